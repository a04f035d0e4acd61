//! Audit trail routes. Everything here requires a token.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::auth::{require, Permission};
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::http::envelope::{empty_data, Envelope};
use crate::services::activities::ActivityService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<u64>,
    pub action: Option<String>,
}

/// GET /api/activities (admin)
async fn list_all(
    user: CurrentUser,
    query: web::Query<ActivityQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require(user.role, Permission::ActivitiesViewAll)?;
    let db = require_db(&app_state)?;
    let entries = ActivityService::new()
        .list_all(db, query.action.as_deref(), query.limit)
        .await?;
    Ok(Envelope::list(entries).ok())
}

/// GET /api/activities/me
async fn my_activities(
    user: CurrentUser,
    query: web::Query<ActivityQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let entries = ActivityService::new()
        .list_for_user(db, user.id, query.action.as_deref(), query.limit)
        .await?;
    Ok(Envelope::list(entries).ok())
}

/// GET /api/activities/me/stats
async fn my_stats(user: CurrentUser, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let stats = ActivityService::new().stats(db, user.id).await?;
    Ok(Envelope::new(stats).ok())
}

/// GET /api/activities/user/{user_id}
async fn user_activities(
    _user: CurrentUser,
    path: web::Path<i64>,
    query: web::Query<ActivityQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let entries = ActivityService::new()
        .list_for_user(db, path.into_inner(), query.action.as_deref(), query.limit)
        .await?;
    Ok(Envelope::list(entries).ok())
}

/// GET /api/activities/game/{game_id}
async fn game_activities(
    _user: CurrentUser,
    path: web::Path<i64>,
    query: web::Query<ActivityQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let entries = ActivityService::new()
        .list_for_game(db, path.into_inner(), query.action.as_deref(), query.limit)
        .await?;
    Ok(Envelope::list(entries).ok())
}

/// DELETE /api/activities/{id} (admin)
async fn delete_activity(
    user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require(user.role, Permission::ActivitiesDelete)?;
    let db = require_db(&app_state)?;
    ActivityService::new().delete(db, path.into_inner()).await?;
    Ok(Envelope::new(empty_data())
        .message("Activity deleted successfully")
        .ok())
}

/// Mounted under a scope already wrapped in `JwtExtract`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_all))
        .route("/me", web::get().to(my_activities))
        .route("/me/stats", web::get().to(my_stats))
        .route("/user/{user_id}", web::get().to(user_activities))
        .route("/game/{game_id}", web::get().to(game_activities))
        .route("/{id}", web::delete().to(delete_activity));
}
