use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{web, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::middleware::JwtExtract;

pub mod activities;
pub mod auth;
pub mod game_lists;
pub mod games;
pub mod health;
pub mod reviews;

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid path parameter: {err}")).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}")).into()
}

fn json_error(_err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::bad_request(ErrorCode::BadRequest, "Invalid JSON body").into()
}

/// Register every route. `main` and the HTTP tests share this, so the
/// production middleware stack around it is the only difference.
///
/// Layout:
/// - `/health`
/// - `/api/auth/**`, `/api/games/**`, `/api/reviews/**` (per-route auth)
/// - `/api/users/me/**`, `/api/activities/**` (token required throughout)
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::JsonConfig::default().error_handler(json_error));

    cfg.service(web::scope("/health").configure(health::configure_routes));
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));
    cfg.service(web::scope("/api/games").configure(games::configure_routes));
    cfg.service(web::scope("/api/reviews").configure(reviews::configure_routes));
    cfg.service(
        web::scope("/api/users/me")
            .wrap(JwtExtract)
            .configure(game_lists::configure_routes),
    );
    cfg.service(
        web::scope("/api/activities")
            .wrap(JwtExtract)
            .configure(activities::configure_routes),
    );
}
