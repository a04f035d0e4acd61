//! Game repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::adapters::games_sea as games_adapter;
use crate::entities::games::{self, Platform};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Game domain model, converted from `games::Model` when loaded through repos.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Game {
    pub id: i64,
    pub title: String,
    pub platform: Platform,
    pub genres: Vec<String>,
    #[serde(with = "crate::utils::serde_time::date")]
    pub release_date: Date,
    pub publisher: String,
    /// Mean rating rounded half-up to one decimal; 0.0 without reviews
    pub avg_rating: f64,
    pub total_reviews: i32,
    #[serde(skip)]
    pub version: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            platform: model.platform,
            genres: model.genres.0,
            release_date: model.release_date,
            publisher: model.publisher,
            avg_rating: model.avg_rating,
            total_reviews: model.total_reviews,
            version: model.version,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Game fields embedded in list, review and activity views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub id: i64,
    pub title: String,
    pub platform: Platform,
    pub genres: Vec<String>,
    pub avg_rating: f64,
}

impl From<games::Model> for GameSummary {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            platform: model.platform,
            genres: model.genres.0,
            avg_rating: model.avg_rating,
        }
    }
}

impl Game {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g.eq_ignore_ascii_case(genre))
    }
}

fn game_not_found(game_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Game, format!("Game {game_id} not found"))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

/// Find game by ID or return `NotFound(Game)`.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| game_not_found(game_id))
}

/// Lock the game row for the rest of the caller's transaction.
pub async fn lock_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    games_adapter::lock_by_id(conn, game_id)
        .await?
        .map(Game::from)
        .ok_or_else(|| game_not_found(game_id))
}

pub async fn exists_title_platform<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    title: &str,
    platform: Platform,
) -> Result<bool, DomainError> {
    Ok(games_adapter::find_by_title_platform(conn, title, platform)
        .await?
        .is_some())
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    platform: Option<Platform>,
    genre: Option<&str>,
    sort: games_adapter::GameSort,
) -> Result<Vec<Game>, DomainError> {
    let games = games_adapter::list(conn, platform, sort).await?;
    // genres live in a JSON column; filter here to stay portable across backends
    Ok(games
        .into_iter()
        .map(Game::from)
        .filter(|g| genre.is_none_or(|wanted| g.has_genre(wanted)))
        .collect())
}

pub async fn search_title<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    needle: &str,
) -> Result<Vec<Game>, DomainError> {
    let games = games_adapter::search_title(conn, needle).await?;
    Ok(games.into_iter().map(Game::from).collect())
}

pub async fn top_rated<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<Game>, DomainError> {
    let games = games_adapter::top_rated(conn, limit).await?;
    Ok(games.into_iter().map(Game::from).collect())
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: games_adapter::GameCreate,
) -> Result<Game, DomainError> {
    let game = games_adapter::create_game(conn, dto).await?;
    Ok(Game::from(game))
}

pub async fn update_details<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    expected_version: i32,
    dto: games_adapter::GameUpdate,
) -> Result<Game, DomainError> {
    let game = games_adapter::update_details(conn, game_id, expected_version, dto).await?;
    Ok(Game::from(game))
}

/// Version-checked write of the derived rating fields.
pub async fn set_rating_aggregate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    expected_version: i32,
    avg_rating: f64,
    total_reviews: i32,
) -> Result<Game, DomainError> {
    let game = games_adapter::set_rating_aggregate(
        conn,
        game_id,
        expected_version,
        avg_rating,
        total_reviews,
    )
    .await?;
    Ok(Game::from(game))
}

pub async fn delete_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<(), DomainError> {
    match games_adapter::delete_by_id(conn, game_id).await? {
        0 => Err(game_not_found(game_id)),
        _ => Ok(()),
    }
}
