//! Review mutation coordinator.
//!
//! Every mutation runs its read-only prechecks on the pool, then opens one
//! transaction in which it locks the game row, writes the review, appends the
//! audit entry and recalculates the game's rating. Any failure rolls the whole
//! unit back. Storage conflicts re-run the operation from the prechecks.

use sea_orm::DatabaseConnection;
use serde_json::json;
use tracing::info;

use crate::adapters::reviews_sea::{ReviewCreate, ReviewUpdate};
use crate::db::retry::retry_on_conflict;
use crate::db::txn::with_txn;
use crate::entities::activity_logs::ActivityAction;
use crate::entities::users::Role;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::reviews::{self, Review, ReviewDetails, ReviewSort};
use crate::repos::games;
use crate::services::{audit, ratings};

pub const RATING_RANGE: std::ops::RangeInclusive<i64> = 1..=5;
pub const TITLE_LEN: std::ops::RangeInclusive<usize> = 3..=100;
pub const BODY_LEN: std::ops::RangeInclusive<usize> = 10..=1000;

/// Validated review content: rating 1-5, trimmed title and body within bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    rating: i16,
    title: String,
    body: String,
}

impl ReviewDraft {
    pub fn new(rating: i64, title: &str, body: &str) -> Result<Self, AppError> {
        if !RATING_RANGE.contains(&rating) {
            return Err(AppError::invalid("Rating must be between 1 and 5"));
        }

        let title = title.trim();
        let title_len = title.chars().count();
        if !TITLE_LEN.contains(&title_len) {
            return Err(AppError::invalid(
                "Review title must be between 3 and 100 characters",
            ));
        }

        let body = body.trim();
        let body_len = body.chars().count();
        if !BODY_LEN.contains(&body_len) {
            return Err(AppError::invalid(
                "Review body must be between 10 and 1000 characters",
            ));
        }

        Ok(Self {
            // range checked above
            rating: rating as i16,
            title: title.to_string(),
            body: body.to_string(),
        })
    }

    pub fn rating(&self) -> i16 {
        self.rating
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

fn duplicate_review() -> AppError {
    AppError::bad_request(
        ErrorCode::DuplicateReview,
        "You have already reviewed this game",
    )
}

fn not_owner() -> AppError {
    AppError::forbidden(
        ErrorCode::NotReviewOwner,
        "You can only modify your own reviews",
    )
}

/// Review service: the only writer of reviews and of game rating aggregates.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReviewService;

impl ReviewService {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_review(
        &self,
        db: &DatabaseConnection,
        user_id: i64,
        game_id: i64,
        draft: ReviewDraft,
    ) -> Result<Review, AppError> {
        let review = retry_on_conflict("create_review", || {
            let draft = draft.clone();
            async move {
                games::require_game(db, game_id).await?;
                if reviews::find_by_user_and_game(db, user_id, game_id)
                    .await?
                    .is_some()
                {
                    return Err(duplicate_review());
                }

                with_txn(db, move |txn| {
                    Box::pin(async move {
                        games::lock_game(txn, game_id).await?;

                        let review = reviews::create_review(
                            txn,
                            ReviewCreate {
                                user_id,
                                game_id,
                                rating: draft.rating,
                                title: draft.title,
                                body: draft.body,
                            },
                        )
                        .await?;

                        audit::append(
                            txn,
                            user_id,
                            game_id,
                            ActivityAction::ReviewSubmitted,
                            json!({ "rating": review.rating, "review_id": review.id }),
                        )
                        .await?;

                        ratings::recalculate(txn, game_id).await?;
                        Ok(review)
                    })
                })
                .await
            }
        })
        .await?;

        info!(
            review_id = review.id,
            user_id,
            game_id,
            rating = review.rating,
            "review created"
        );
        Ok(review)
    }

    pub async fn update_review(
        &self,
        db: &DatabaseConnection,
        review_id: i64,
        caller_user_id: i64,
        draft: ReviewDraft,
    ) -> Result<Review, AppError> {
        let review = retry_on_conflict("update_review", || {
            let draft = draft.clone();
            async move {
                let existing = reviews::require_review(db, review_id).await?;
                if existing.user_id != caller_user_id {
                    return Err(not_owner());
                }
                let game_id = existing.game_id;

                with_txn(db, move |txn| {
                    Box::pin(async move {
                        games::lock_game(txn, game_id).await?;

                        let review = reviews::update_review(
                            txn,
                            ReviewUpdate {
                                id: review_id,
                                rating: draft.rating,
                                title: draft.title,
                                body: draft.body,
                            },
                        )
                        .await?;

                        audit::append(
                            txn,
                            caller_user_id,
                            game_id,
                            ActivityAction::ReviewUpdated,
                            json!({ "rating": review.rating, "review_id": review.id }),
                        )
                        .await?;

                        ratings::recalculate(txn, game_id).await?;
                        Ok(review)
                    })
                })
                .await
            }
        })
        .await?;

        info!(
            review_id,
            user_id = caller_user_id,
            game_id = review.game_id,
            rating = review.rating,
            "review updated"
        );
        Ok(review)
    }

    /// Owners may delete their review; admins may delete any review.
    pub async fn delete_review(
        &self,
        db: &DatabaseConnection,
        review_id: i64,
        caller_user_id: i64,
        caller_role: Role,
    ) -> Result<(), AppError> {
        let game_id = retry_on_conflict("delete_review", || async move {
            let existing = reviews::require_review(db, review_id).await?;
            if existing.user_id != caller_user_id && caller_role != Role::Admin {
                return Err(not_owner());
            }
            // captured before the row disappears
            let game_id = existing.game_id;

            with_txn(db, move |txn| {
                Box::pin(async move {
                    games::lock_game(txn, game_id).await?;
                    reviews::delete_review(txn, review_id).await?;

                    audit::append(
                        txn,
                        caller_user_id,
                        game_id,
                        ActivityAction::ReviewDeleted,
                        json!({ "review_id": review_id }),
                    )
                    .await?;

                    ratings::recalculate(txn, game_id).await?;
                    Ok(game_id)
                })
            })
            .await
        })
        .await?;

        info!(
            review_id,
            user_id = caller_user_id,
            role = ?caller_role,
            game_id,
            "review deleted"
        );
        Ok(())
    }

    pub async fn get_review(
        &self,
        db: &DatabaseConnection,
        review_id: i64,
    ) -> Result<ReviewDetails, AppError> {
        Ok(reviews::require_details(db, review_id).await?)
    }

    /// 404 when the game does not exist, empty list when it has no reviews.
    pub async fn list_for_game(
        &self,
        db: &DatabaseConnection,
        game_id: i64,
        sort: ReviewSort,
    ) -> Result<Vec<ReviewDetails>, AppError> {
        games::require_game(db, game_id).await?;
        Ok(reviews::list_by_game(db, game_id, sort).await?)
    }

    pub async fn list_for_user(
        &self,
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<Vec<ReviewDetails>, AppError> {
        Ok(reviews::list_by_user(db, user_id).await?)
    }
}
