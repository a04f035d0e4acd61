//! Game catalogue routes. Reads are public; writes need an admin.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;
use time::Date;

use crate::auth::{require, Permission};
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::http::envelope::{empty_data, Envelope};
use crate::middleware::JwtExtract;
use crate::services::games::{GamePatch, GameService, NewGame};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub platform: Option<String>,
    pub genre: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopRatedQuery {
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub title: String,
    pub platform: String,
    pub genres: Vec<String>,
    #[serde(with = "crate::utils::serde_time::date")]
    pub release_date: Date,
    pub publisher: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateGameRequest {
    pub title: Option<String>,
    pub platform: Option<String>,
    pub genres: Option<Vec<String>>,
    #[serde(default, with = "crate::utils::serde_time::date::option")]
    pub release_date: Option<Date>,
    pub publisher: Option<String>,
}

/// GET /api/games
async fn list(
    query: web::Query<ListQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let games = GameService::new()
        .list(
            db,
            query.platform.as_deref(),
            query.genre.as_deref(),
            query.sort.as_deref(),
        )
        .await?;
    Ok(Envelope::list(games).ok())
}

/// GET /api/games/search?q=
async fn search(
    query: web::Query<SearchQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let games = GameService::new().search(db, query.q.as_deref()).await?;
    Ok(Envelope::list(games).ok())
}

/// GET /api/games/top-rated?limit=
async fn top_rated(
    query: web::Query<TopRatedQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let games = GameService::new().top_rated(db, query.limit).await?;
    Ok(Envelope::list(games).ok())
}

/// GET /api/games/platform/{platform}
async fn by_platform(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let games = GameService::new().by_platform(db, &path).await?;
    Ok(Envelope::list(games).ok())
}

/// GET /api/games/{id}
async fn get_game(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let game = GameService::new().get(db, path.into_inner()).await?;
    Ok(Envelope::new(game).ok())
}

/// POST /api/games
async fn create_game(
    user: CurrentUser,
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require(user.role, Permission::GamesCreate)?;
    let body = body.into_inner();
    let new_game = NewGame::new(
        &body.title,
        &body.platform,
        body.genres,
        body.release_date,
        &body.publisher,
    )?;

    let db = require_db(&app_state)?;
    let game = GameService::new().create(db, new_game).await?;
    Ok(Envelope::new(game)
        .message("Game created successfully")
        .created())
}

/// PUT /api/games/{id}
async fn update_game(
    user: CurrentUser,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require(user.role, Permission::GamesUpdate)?;
    let body = body.into_inner();
    let patch = GamePatch {
        title: body.title,
        platform: body.platform,
        genres: body.genres,
        release_date: body.release_date,
        publisher: body.publisher,
    };

    let db = require_db(&app_state)?;
    let game = GameService::new()
        .update(db, path.into_inner(), patch)
        .await?;
    Ok(Envelope::new(game)
        .message("Game updated successfully")
        .ok())
}

/// DELETE /api/games/{id}
async fn delete_game(
    user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require(user.role, Permission::GamesDelete)?;
    let db = require_db(&app_state)?;
    GameService::new().delete(db, path.into_inner()).await?;
    Ok(Envelope::new(empty_data())
        .message("Game deleted successfully")
        .ok())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list))
            .route(web::post().to(create_game).wrap(JwtExtract)),
    )
    .route("/search", web::get().to(search))
    .route("/top-rated", web::get().to(top_rated))
    .route("/platform/{platform}", web::get().to(by_platform))
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_game))
            .route(web::put().to(update_game).wrap(JwtExtract))
            .route(web::delete().to(delete_game).wrap(JwtExtract)),
    );
}
