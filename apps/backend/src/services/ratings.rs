//! Aggregate rating recalculation.

use sea_orm::DatabaseTransaction;
use tracing::debug;

use crate::error::AppError;
use crate::repos::{games, reviews};

/// Mean of `sum / count` rounded half-up to one decimal, computed on
/// integer tenths so no binary rounding creeps in. `0.0` when `count` is 0.
pub fn rounded_average(count: i64, sum: i64) -> f64 {
    if count <= 0 {
        return 0.0;
    }
    // round(10 * sum / count) == floor((20 * sum + count) / (2 * count)) for sum >= 0
    let tenths = (20 * sum + count) / (2 * count);
    tenths as f64 / 10.0
}

/// Recompute `avg_rating`/`total_reviews` for `game_id` from the reviews
/// visible to `txn` and write them with a version-checked update.
///
/// Must run after the review write is staged on the same transaction. A
/// concurrent write to the game row surfaces as a storage conflict.
pub async fn recalculate(txn: &DatabaseTransaction, game_id: i64) -> Result<(), AppError> {
    let game = games::require_game(txn, game_id).await?;
    let stats = reviews::rating_stats(txn, game_id).await?;

    let avg_rating = rounded_average(stats.count, stats.sum);
    let total_reviews = i32::try_from(stats.count)
        .map_err(|_| AppError::internal(format!("review count overflow for game {game_id}")))?;

    games::set_rating_aggregate(txn, game_id, game.version, avg_rating, total_reviews).await?;

    debug!(game_id, avg_rating, total_reviews, "game rating recalculated");
    Ok(())
}
