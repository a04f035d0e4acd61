//! The caller's wishlist and played collections under `/api/users/me`.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::auth::{require, Permission};
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::http::Envelope;
use crate::services::game_lists::GameListService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct WishlistRequest {
    pub game_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct PlayedRequest {
    pub game_id: i64,
    pub completion_hours: Option<f64>,
}

/// GET /api/users/me/gamelist
async fn gamelist(user: CurrentUser, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let lists = GameListService::new().get(db, user.id).await?;
    Ok(Envelope::new(lists).ok())
}

/// GET /api/users/me/wishlist
async fn wishlist(user: CurrentUser, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let items = GameListService::new().wishlist(db, user.id).await?;
    Ok(Envelope::list(items).ok())
}

/// GET /api/users/me/played
async fn played(user: CurrentUser, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let items = GameListService::new().played(db, user.id).await?;
    Ok(Envelope::list(items).ok())
}

/// POST /api/users/me/wishlist
async fn add_to_wishlist(
    user: CurrentUser,
    body: ValidatedJson<WishlistRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require(user.role, Permission::ListsManageOwn)?;
    let db = require_db(&app_state)?;
    let lists = GameListService::new()
        .add_to_wishlist(db, user.id, body.game_id)
        .await?;
    Ok(Envelope::new(lists).message("Game added to wishlist").ok())
}

/// DELETE /api/users/me/wishlist/{game_id}
async fn remove_from_wishlist(
    user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require(user.role, Permission::ListsManageOwn)?;
    let db = require_db(&app_state)?;
    let lists = GameListService::new()
        .remove_from_wishlist(db, user.id, path.into_inner())
        .await?;
    Ok(Envelope::new(lists)
        .message("Game removed from wishlist")
        .ok())
}

/// POST /api/users/me/played
async fn mark_as_played(
    user: CurrentUser,
    body: ValidatedJson<PlayedRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require(user.role, Permission::ListsManageOwn)?;
    let db = require_db(&app_state)?;
    let lists = GameListService::new()
        .mark_as_played(db, user.id, body.game_id, body.completion_hours)
        .await?;
    Ok(Envelope::new(lists).message("Game marked as played").ok())
}

/// DELETE /api/users/me/played/{game_id}
async fn remove_from_played(
    user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require(user.role, Permission::ListsManageOwn)?;
    let db = require_db(&app_state)?;
    let lists = GameListService::new()
        .remove_from_played(db, user.id, path.into_inner())
        .await?;
    Ok(Envelope::new(lists)
        .message("Game removed from played list")
        .ok())
}

/// Mounted under a scope already wrapped in `JwtExtract`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/gamelist", web::get().to(gamelist))
        .service(
            web::resource("/wishlist")
                .route(web::get().to(wishlist))
                .route(web::post().to(add_to_wishlist)),
        )
        .route("/wishlist/{game_id}", web::delete().to(remove_from_wishlist))
        .service(
            web::resource("/played")
                .route(web::get().to(played))
                .route(web::post().to(mark_as_played)),
        )
        .route("/played/{game_id}", web::delete().to(remove_from_played));
}
