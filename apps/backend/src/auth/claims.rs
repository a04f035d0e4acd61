//! Claims carried by backend-issued access tokens.

use serde::{Deserialize, Serialize};

use crate::entities::users::Role;
use crate::error::AppError;

/// Inserted into request extensions by the `JwtExtract` middleware.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BackendClaims {
    /// User id, as a decimal string
    pub sub: String,
    pub email: String,
    /// Role at issue time; `CurrentUser` reloads the authoritative one
    pub role: Role,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl BackendClaims {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| AppError::unauthorized_invalid_jwt())
    }
}
