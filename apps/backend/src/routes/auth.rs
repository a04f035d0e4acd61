use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::http::Envelope;
use crate::middleware::JwtExtract;
use crate::services::users::{Registration, UserService};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/register
async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let registration = Registration::new(&body.username, &body.email, &body.password, &body.country)?;
    let db = require_db(&app_state)?;

    let session = UserService::new()
        .register(db, &app_state.security, registration)
        .await?;

    Ok(Envelope::new(session)
        .message("User registered successfully")
        .created())
}

/// POST /api/auth/login
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;

    let session = UserService::new()
        .login(db, &app_state.security, &body.email, &body.password)
        .await?;

    Ok(Envelope::new(session).message("Login successful").ok())
}

/// GET /api/auth/me
async fn me(user: CurrentUser, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let profile = UserService::new().me(db, user.id).await?;
    Ok(Envelope::new(profile).ok())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .service(
            web::resource("/me")
                .wrap(JwtExtract)
                .route(web::get().to(me)),
        );
}
