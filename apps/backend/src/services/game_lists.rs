//! Wishlist / played collections.
//!
//! A game sits in at most one of the two collections. Each audited transition
//! commits together with its activity entry.

use sea_orm::DatabaseConnection;
use serde_json::json;
use tracing::info;

use crate::db::txn::with_txn;
use crate::entities::activity_logs::ActivityAction;
use crate::entities::game_list_entries::ListKind;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::game_lists::{self, ListItem, UserGameList};
use crate::repos::games;
use crate::services::audit;

fn already_listed(list: ListKind) -> AppError {
    let detail = match list {
        ListKind::Wishlist => "Game already in wishlist",
        ListKind::Played => "Game already marked as played",
    };
    AppError::bad_request(ErrorCode::AlreadyInList, detail)
}

fn not_listed(list: ListKind) -> AppError {
    let detail = match list {
        ListKind::Wishlist => "Game not found in wishlist",
        ListKind::Played => "Game not found in played list",
    };
    AppError::not_found(ErrorCode::ListEntryNotFound, detail)
}

/// `completion_hours` must be a finite, non-negative number when present.
pub fn validate_completion_hours(hours: Option<f64>) -> Result<Option<f64>, AppError> {
    match hours {
        Some(h) if !h.is_finite() || h < 0.0 => Err(AppError::invalid(
            "completion_hours must be a non-negative number",
        )),
        other => Ok(other),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GameListService;

impl GameListService {
    pub fn new() -> Self {
        Self
    }

    pub async fn get(&self, db: &DatabaseConnection, user_id: i64) -> Result<UserGameList, AppError> {
        Ok(game_lists::load(db, user_id).await?)
    }

    pub async fn wishlist(&self, db: &DatabaseConnection, user_id: i64) -> Result<Vec<ListItem>, AppError> {
        Ok(game_lists::load_one(db, user_id, ListKind::Wishlist).await?)
    }

    pub async fn played(&self, db: &DatabaseConnection, user_id: i64) -> Result<Vec<ListItem>, AppError> {
        Ok(game_lists::load_one(db, user_id, ListKind::Played).await?)
    }

    /// Rejected when the game is already in either collection.
    pub async fn add_to_wishlist(
        &self,
        db: &DatabaseConnection,
        user_id: i64,
        game_id: i64,
    ) -> Result<UserGameList, AppError> {
        games::require_game(db, game_id).await?;

        with_txn(db, move |txn| {
            Box::pin(async move {
                if let Some(entry) = game_lists::find_entry(txn, user_id, game_id).await? {
                    return Err(already_listed(entry.list));
                }
                game_lists::insert(txn, user_id, game_id, ListKind::Wishlist).await?;
                audit::append(
                    txn,
                    user_id,
                    game_id,
                    ActivityAction::AddedToWishlist,
                    json!({ "source": "web" }),
                )
                .await?;
                Ok(())
            })
        })
        .await?;

        info!(user_id, game_id, "added to wishlist");
        Ok(game_lists::load(db, user_id).await?)
    }

    pub async fn remove_from_wishlist(
        &self,
        db: &DatabaseConnection,
        user_id: i64,
        game_id: i64,
    ) -> Result<UserGameList, AppError> {
        with_txn(db, move |txn| {
            Box::pin(async move {
                if !game_lists::remove(txn, user_id, game_id, ListKind::Wishlist).await? {
                    return Err(not_listed(ListKind::Wishlist));
                }
                audit::append(
                    txn,
                    user_id,
                    game_id,
                    ActivityAction::RemovedFromWishlist,
                    json!({}),
                )
                .await?;
                Ok(())
            })
        })
        .await?;

        info!(user_id, game_id, "removed from wishlist");
        Ok(game_lists::load(db, user_id).await?)
    }

    /// Moves the game out of the wishlist when it is there.
    pub async fn mark_as_played(
        &self,
        db: &DatabaseConnection,
        user_id: i64,
        game_id: i64,
        completion_hours: Option<f64>,
    ) -> Result<UserGameList, AppError> {
        let completion_hours = validate_completion_hours(completion_hours)?;
        games::require_game(db, game_id).await?;

        with_txn(db, move |txn| {
            Box::pin(async move {
                match game_lists::find_entry(txn, user_id, game_id).await? {
                    Some(entry) if entry.list == ListKind::Played => {
                        return Err(already_listed(ListKind::Played));
                    }
                    Some(entry) => {
                        game_lists::move_entry(txn, entry.id, ListKind::Played).await?;
                    }
                    None => {
                        game_lists::insert(txn, user_id, game_id, ListKind::Played).await?;
                    }
                }
                audit::append(
                    txn,
                    user_id,
                    game_id,
                    ActivityAction::MarkedAsPlayed,
                    json!({ "completion_hours": completion_hours }),
                )
                .await?;
                Ok(())
            })
        })
        .await?;

        info!(user_id, game_id, ?completion_hours, "marked as played");
        Ok(game_lists::load(db, user_id).await?)
    }

    /// Not audited.
    pub async fn remove_from_played(
        &self,
        db: &DatabaseConnection,
        user_id: i64,
        game_id: i64,
    ) -> Result<UserGameList, AppError> {
        if !game_lists::remove(db, user_id, game_id, ListKind::Played).await? {
            return Err(not_listed(ListKind::Played));
        }

        info!(user_id, game_id, "removed from played");
        Ok(game_lists::load(db, user_id).await?)
    }
}
