//! Game catalogue service: listings, search and admin maintenance.
//!
//! Aggregate rating fields are never written here; see `services::ratings`.

use sea_orm::DatabaseConnection;
use time::Date;
use tracing::info;

use crate::adapters::games_sea::{GameCreate, GameSort, GameUpdate};
use crate::db::retry::retry_on_conflict;
use crate::entities::games::Platform;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::games::{self, Game};

pub const DEFAULT_TOP_RATED_LIMIT: u64 = 10;
pub const MAX_TOP_RATED_LIMIT: u64 = 100;

/// Trimmed, de-duplicated genres in their original order. Empty input is rejected.
pub fn normalize_genres(raw: Vec<String>) -> Result<Vec<String>, AppError> {
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for genre in raw {
        let genre = genre.trim();
        if genre.is_empty() {
            continue;
        }
        if !out.iter().any(|g| g.eq_ignore_ascii_case(genre)) {
            out.push(genre.to_string());
        }
    }
    if out.is_empty() {
        return Err(AppError::invalid("At least one genre is required"));
    }
    Ok(out)
}

fn required_text(value: &str, field: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::invalid(format!("{field} is required")));
    }
    Ok(value.to_string())
}

pub fn parse_platform(raw: &str) -> Result<Platform, AppError> {
    Platform::parse(raw).ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::InvalidPlatform,
            format!("Invalid platform '{raw}'. Must be PS4 or PS5"),
        )
    })
}

fn duplicate_game() -> AppError {
    AppError::bad_request(
        ErrorCode::DuplicateGame,
        "Game already exists on this platform",
    )
}

/// Input for `GameService::create`, validated on construction.
#[derive(Debug, Clone)]
pub struct NewGame {
    create: GameCreate,
}

impl NewGame {
    pub fn new(
        title: &str,
        platform: &str,
        genres: Vec<String>,
        release_date: Date,
        publisher: &str,
    ) -> Result<Self, AppError> {
        Ok(Self {
            create: GameCreate {
                title: required_text(title, "Title")?,
                platform: parse_platform(platform)?,
                genres: normalize_genres(genres)?,
                release_date,
                publisher: required_text(publisher, "Publisher")?,
            },
        })
    }
}

/// Partial update of descriptive fields.
#[derive(Debug, Clone, Default)]
pub struct GamePatch {
    pub title: Option<String>,
    pub platform: Option<String>,
    pub genres: Option<Vec<String>>,
    pub release_date: Option<Date>,
    pub publisher: Option<String>,
}

impl GamePatch {
    fn validate(self) -> Result<GameUpdate, AppError> {
        Ok(GameUpdate {
            title: self
                .title
                .map(|t| required_text(&t, "Title"))
                .transpose()?,
            platform: self.platform.map(|p| parse_platform(&p)).transpose()?,
            genres: self.genres.map(normalize_genres).transpose()?,
            release_date: self.release_date,
            publisher: self
                .publisher
                .map(|p| required_text(&p, "Publisher"))
                .transpose()?,
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GameService;

impl GameService {
    pub fn new() -> Self {
        Self
    }

    pub async fn list(
        &self,
        db: &DatabaseConnection,
        platform: Option<&str>,
        genre: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Vec<Game>, AppError> {
        let platform = platform.map(parse_platform).transpose()?;
        let genre = genre.map(str::trim).filter(|g| !g.is_empty());
        Ok(games::list(db, platform, genre, GameSort::parse(sort)).await?)
    }

    pub async fn search(&self, db: &DatabaseConnection, q: Option<&str>) -> Result<Vec<Game>, AppError> {
        let q = q.map(str::trim).filter(|q| !q.is_empty()).ok_or_else(|| {
            AppError::invalid("Search query 'q' is required")
        })?;
        Ok(games::search_title(db, q).await?)
    }

    pub async fn top_rated(
        &self,
        db: &DatabaseConnection,
        limit: Option<u64>,
    ) -> Result<Vec<Game>, AppError> {
        let limit = limit
            .unwrap_or(DEFAULT_TOP_RATED_LIMIT)
            .clamp(1, MAX_TOP_RATED_LIMIT);
        Ok(games::top_rated(db, limit).await?)
    }

    pub async fn by_platform(
        &self,
        db: &DatabaseConnection,
        platform: &str,
    ) -> Result<Vec<Game>, AppError> {
        let platform = parse_platform(platform)?;
        Ok(games::list(db, Some(platform), None, GameSort::default()).await?)
    }

    pub async fn get(&self, db: &DatabaseConnection, game_id: i64) -> Result<Game, AppError> {
        Ok(games::require_game(db, game_id).await?)
    }

    pub async fn create(&self, db: &DatabaseConnection, new_game: NewGame) -> Result<Game, AppError> {
        let dto = new_game.create;
        if games::exists_title_platform(db, &dto.title, dto.platform).await? {
            return Err(duplicate_game());
        }

        let game = games::create_game(db, dto).await?;
        info!(game_id = game.id, platform = game.platform.as_str(), "game created");
        Ok(game)
    }

    /// Updates descriptive fields under the row's version; ratings stay untouched.
    pub async fn update(
        &self,
        db: &DatabaseConnection,
        game_id: i64,
        patch: GamePatch,
    ) -> Result<Game, AppError> {
        let dto = patch.validate()?;

        let game = retry_on_conflict("update_game", || {
            let dto = dto.clone();
            async move {
                let current = games::require_game(db, game_id).await?;
                if dto.is_empty() {
                    return Ok(current);
                }

                let title = dto.title.as_deref().unwrap_or(&current.title);
                let platform = dto.platform.unwrap_or(current.platform);
                let identity_changed = title != current.title || platform != current.platform;
                if identity_changed && games::exists_title_platform(db, title, platform).await? {
                    return Err(duplicate_game());
                }

                Ok(games::update_details(db, game_id, current.version, dto).await?)
            }
        })
        .await?;

        info!(game_id, version = game.version, "game updated");
        Ok(game)
    }

    /// Removes the game together with its reviews, list entries and activity.
    pub async fn delete(&self, db: &DatabaseConnection, game_id: i64) -> Result<(), AppError> {
        games::delete_game(db, game_id).await?;
        info!(game_id, "game deleted");
        Ok(())
    }
}
