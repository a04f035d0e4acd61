//! Registration, login and profile lookup.

use std::sync::LazyLock;
use std::time::SystemTime;

use regex::Regex;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{info, warn};

use crate::adapters::users_sea::UserCreate;
use crate::auth::{mint_access_token, password};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;
use crate::repos::users::{self, User};
use crate::state::security_config::SecurityConfig;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 32;
pub const MIN_PASSWORD_LEN: usize = 6;

#[allow(clippy::unwrap_used)]
static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

#[allow(clippy::unwrap_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Issued token plus the profile it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Registration input after normalisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: String,
    email: String,
    password: String,
    country: String,
}

impl Registration {
    pub fn new(username: &str, email: &str, password: &str, country: &str) -> Result<Self, AppError> {
        let username = username.trim();
        let len = username.chars().count();
        if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) || !USERNAME_RE.is_match(username) {
            return Err(AppError::invalid(
                "Username must be 3-32 characters of letters, digits and underscores",
            ));
        }

        let email = normalize_email(email);
        if !EMAIL_RE.is_match(&email) {
            return Err(AppError::invalid("A valid email is required"));
        }

        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::invalid("Password must be at least 6 characters"));
        }

        let country = country.trim();
        if country.is_empty() {
            return Err(AppError::invalid("Country is required"));
        }

        Ok(Self {
            username: username.to_string(),
            email,
            password: password.to_string(),
            country: country.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(ErrorCode::InvalidCredentials, "Invalid email or password")
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        Self
    }

    /// New accounts always get the `user` role.
    pub async fn register(
        &self,
        db: &DatabaseConnection,
        security: &SecurityConfig,
        registration: Registration,
    ) -> Result<AuthSession, AppError> {
        if users::email_exists(db, &registration.email).await? {
            return Err(AppError::bad_request(
                ErrorCode::DuplicateEmail,
                "Email already registered",
            ));
        }
        if users::username_exists(db, &registration.username).await? {
            return Err(AppError::bad_request(
                ErrorCode::DuplicateUsername,
                "Username already taken",
            ));
        }

        let password_hash = password::hash_password(registration.password).await?;
        let user = users::create_user(
            db,
            UserCreate::new(
                registration.username,
                registration.email,
                password_hash,
                registration.country,
            ),
        )
        .await?;

        let token = mint_access_token(user.id, &user.email, user.role, SystemTime::now(), security)?;
        info!(user_id = user.id, email = %Redacted(&user.email), "user registered");
        Ok(AuthSession { token, user })
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(
        &self,
        db: &DatabaseConnection,
        security: &SecurityConfig,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AppError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AppError::invalid("Email and password are required"));
        }

        let Some(found) = users::find_with_hash_by_email(db, &email).await? else {
            warn!(email = %Redacted(&email), "login for unknown email");
            return Err(invalid_credentials());
        };

        if !password::verify_password(password.to_string(), found.password_hash).await? {
            warn!(user_id = found.user.id, "login with wrong password");
            return Err(invalid_credentials());
        }

        let user = found.user;
        let token = mint_access_token(user.id, &user.email, user.role, SystemTime::now(), security)?;
        info!(user_id = user.id, "user logged in");
        Ok(AuthSession { token, user })
    }

    pub async fn me(&self, db: &DatabaseConnection, user_id: i64) -> Result<User, AppError> {
        Ok(users::require_user(db, user_id).await?)
    }
}
