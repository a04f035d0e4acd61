use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use super::claims::BackendClaims;
use crate::entities::users::Role;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Mint an access token for `user_id`, valid for `security.token_ttl_secs`.
pub fn mint_access_token(
    user_id: i64,
    email: &str,
    role: Role,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let claims = BackendClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        iat,
        exp: iat + security.token_ttl_secs,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify signature and expiry, pinned to the configured algorithm.
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<BackendClaims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    decode::<BackendClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}
