//! Audit log writer.
//!
//! Appends run on the caller's transaction so an entry exists exactly when
//! the mutation it describes commits. There is deliberately no update path.

use sea_orm::prelude::Json;
use sea_orm::DatabaseTransaction;
use tracing::debug;

use crate::entities::activity_logs::ActivityAction;
use crate::error::AppError;
use crate::repos::activity_logs::{self, ActivityEntry};

pub async fn append(
    txn: &DatabaseTransaction,
    user_id: i64,
    game_id: i64,
    action: ActivityAction,
    meta: Json,
) -> Result<ActivityEntry, AppError> {
    let entry = activity_logs::insert(txn, user_id, game_id, action, meta).await?;
    debug!(
        activity_id = entry.id,
        user_id,
        game_id,
        action = action.as_str(),
        "audit entry appended"
    );
    Ok(entry)
}
