//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::users_sea as users_adapter;
use crate::entities::users::{self, Role};
use crate::errors::domain::{DomainError, NotFoundKind};

/// User domain model. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub country: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            country: model.country,
            role: model.role,
            created_at: model.created_at,
        }
    }
}

/// Public profile fields embedded in review and activity views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub country: String,
}

impl From<users::Model> for UserSummary {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            country: model.country,
        }
    }
}

/// A user together with the stored PHC hash, for password verification only.
#[derive(Debug, Clone)]
pub struct UserWithHash {
    pub user: User,
    pub password_hash: String,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, DomainError> {
    find_by_id(conn, user_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found"))
    })
}

pub async fn find_with_hash_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<UserWithHash>, DomainError> {
    let user = users_adapter::find_by_email(conn, email).await?;
    Ok(user.map(|model| {
        let password_hash = model.password_hash.clone();
        UserWithHash {
            user: User::from(model),
            password_hash,
        }
    }))
}

pub async fn email_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<bool, DomainError> {
    Ok(users_adapter::find_by_email(conn, email).await?.is_some())
}

pub async fn username_exists<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<bool, DomainError> {
    Ok(users_adapter::find_by_username(conn, username)
        .await?
        .is_some())
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: users_adapter::UserCreate,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(conn, dto).await?;
    Ok(User::from(user))
}
