//! Review repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::reviews_sea::{self as reviews_adapter, ReviewWithRefs};
use crate::entities::reviews;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::games::GameSummary;
use crate::repos::users::UserSummary;

pub use reviews_adapter::{RatingStats, ReviewSort};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub game_id: i64,
    pub rating: i16,
    pub title: String,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<reviews::Model> for Review {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            game_id: model.game_id,
            rating: model.rating,
            title: model.title,
            body: model.body,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// A review as the read endpoints show it: the review fields plus its
/// author and game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewDetails {
    #[serde(flatten)]
    pub review: Review,
    pub user: UserSummary,
    pub game: GameSummary,
}

impl From<ReviewWithRefs> for ReviewDetails {
    fn from((review, user, game): ReviewWithRefs) -> Self {
        Self {
            review: Review::from(review),
            user: UserSummary::from(user),
            game: GameSummary::from(game),
        }
    }
}

fn review_not_found(review_id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Review, format!("Review {review_id} not found"))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    review_id: i64,
) -> Result<Option<Review>, DomainError> {
    let review = reviews_adapter::find_by_id(conn, review_id).await?;
    Ok(review.map(Review::from))
}

pub async fn require_review<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    review_id: i64,
) -> Result<Review, DomainError> {
    find_by_id(conn, review_id)
        .await?
        .ok_or_else(|| review_not_found(review_id))
}

pub async fn require_details<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    review_id: i64,
) -> Result<ReviewDetails, DomainError> {
    reviews_adapter::find_with_refs(conn, review_id)
        .await?
        .map(ReviewDetails::from)
        .ok_or_else(|| review_not_found(review_id))
}

pub async fn find_by_user_and_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    game_id: i64,
) -> Result<Option<Review>, DomainError> {
    let review = reviews_adapter::find_by_user_and_game(conn, user_id, game_id).await?;
    Ok(review.map(Review::from))
}

pub async fn create_review<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: reviews_adapter::ReviewCreate,
) -> Result<Review, DomainError> {
    let review = reviews_adapter::create_review(conn, dto).await?;
    Ok(Review::from(review))
}

pub async fn update_review<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: reviews_adapter::ReviewUpdate,
) -> Result<Review, DomainError> {
    let review_id = dto.id;
    let review = reviews_adapter::update_review(conn, dto)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::RecordNotFound(_) => review_not_found(review_id),
            other => DomainError::from(other),
        })?;
    Ok(Review::from(review))
}

pub async fn delete_review<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    review_id: i64,
) -> Result<(), DomainError> {
    match reviews_adapter::delete_by_id(conn, review_id).await? {
        0 => Err(review_not_found(review_id)),
        _ => Ok(()),
    }
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    sort: ReviewSort,
) -> Result<Vec<ReviewDetails>, DomainError> {
    let rows = reviews_adapter::list_by_game(conn, game_id, sort).await?;
    Ok(rows.into_iter().map(ReviewDetails::from).collect())
}

pub async fn list_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<ReviewDetails>, DomainError> {
    let rows = reviews_adapter::list_by_user(conn, user_id).await?;
    Ok(rows.into_iter().map(ReviewDetails::from).collect())
}

pub async fn rating_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<RatingStats, DomainError> {
    Ok(reviews_adapter::rating_stats(conn, game_id).await?)
}
