//! Review routes: thin wrappers over `ReviewService`.

use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::auth::{require, Permission};
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::http::envelope::{empty_data, Envelope};
use crate::middleware::JwtExtract;
use crate::repos::reviews::ReviewSort;
use crate::services::reviews::{ReviewDraft, ReviewService};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub game_id: i64,
    pub rating: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    pub sort: Option<String>,
}

/// POST /api/reviews
async fn create_review(
    user: CurrentUser,
    body: ValidatedJson<CreateReviewRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require(user.role, Permission::ReviewsCreate)?;
    let draft = ReviewDraft::new(body.rating, &body.title, &body.body)?;
    let db = require_db(&app_state)?;

    let svc = ReviewService::new();
    let review = svc.create_review(db, user.id, body.game_id, draft).await?;
    let review = svc.get_review(db, review.id).await?;
    Ok(Envelope::new(review)
        .message("Review created successfully")
        .created())
}

/// GET /api/reviews/me
async fn my_reviews(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let reviews = ReviewService::new().list_for_user(db, user.id).await?;
    Ok(Envelope::list(reviews).ok())
}

/// GET /api/reviews/game/{game_id}?sort=
async fn game_reviews(
    path: web::Path<i64>,
    query: web::Query<SortQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let sort = ReviewSort::parse(query.sort.as_deref());
    let reviews = ReviewService::new()
        .list_for_game(db, path.into_inner(), sort)
        .await?;
    Ok(Envelope::list(reviews).ok())
}

/// GET /api/reviews/user/{user_id}
async fn user_reviews(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let reviews = ReviewService::new()
        .list_for_user(db, path.into_inner())
        .await?;
    Ok(Envelope::list(reviews).ok())
}

/// GET /api/reviews/{id}
async fn get_review(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let review = ReviewService::new().get_review(db, path.into_inner()).await?;
    Ok(Envelope::new(review).ok())
}

/// PUT /api/reviews/{id}
async fn update_review(
    user: CurrentUser,
    path: web::Path<i64>,
    body: ValidatedJson<UpdateReviewRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require(user.role, Permission::ReviewsUpdateOwn)?;
    let draft = ReviewDraft::new(body.rating, &body.title, &body.body)?;
    let db = require_db(&app_state)?;

    let svc = ReviewService::new();
    let review = svc
        .update_review(db, path.into_inner(), user.id, draft)
        .await?;
    let review = svc.get_review(db, review.id).await?;
    Ok(Envelope::new(review)
        .message("Review updated successfully")
        .ok())
}

/// DELETE /api/reviews/{id}
async fn delete_review(
    user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require(user.role, Permission::ReviewsDeleteOwn)?;
    let db = require_db(&app_state)?;

    ReviewService::new()
        .delete_review(db, path.into_inner(), user.id, user.role)
        .await?;
    Ok(Envelope::new(empty_data())
        .message("Review deleted successfully")
        .ok())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .wrap(JwtExtract)
            .route(web::post().to(create_review)),
    )
    .service(
        web::resource("/me")
            .wrap(JwtExtract)
            .route(web::get().to(my_reviews)),
    )
    .route("/game/{game_id}", web::get().to(game_reviews))
    .route("/user/{user_id}", web::get().to(user_reviews))
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_review))
            .route(web::put().to(update_review).wrap(JwtExtract))
            .route(web::delete().to(delete_review).wrap(JwtExtract)),
    );
}
