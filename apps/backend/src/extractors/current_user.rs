use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;

use crate::auth::claims::BackendClaims;
use crate::db::require_db;
use crate::entities::users::Role;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::users;
use crate::state::app_state::AppState;

/// Authenticated caller, confirmed against the users table.
///
/// Claims come from request extensions (set by the `JwtExtract` middleware);
/// the role is the one stored in the database, not the one in the token.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub(crate) fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::internal("AppState missing from request"))
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let claims = req
                .extensions()
                .get::<BackendClaims>()
                .ok_or_else(AppError::unauthorized_missing_bearer)?
                .clone();
            let user_id = claims.user_id()?;

            let state = app_state(&req)?;
            let db = require_db(&state)?;

            let user = users::find_by_id(db, user_id).await?.ok_or_else(|| {
                AppError::forbidden(
                    ErrorCode::ForbiddenUserNotFound,
                    "User for this token no longer exists",
                )
            })?;

            Ok(CurrentUser {
                id: user.id,
                email: user.email,
                role: user.role,
            })
        })
    }
}
