//! Audit trail repository functions.

use sea_orm::prelude::Json;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::activity_logs_sea::{self as activity_adapter, ActivityWithRefs};
use crate::entities::activity_logs::{self, ActivityAction};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::games::GameSummary;
use crate::repos::users::UserSummary;

pub use activity_adapter::ActivityFilter;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub id: i64,
    pub user_id: i64,
    pub game_id: i64,
    pub action: ActivityAction,
    pub meta: Json,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl From<activity_logs::Model> for ActivityEntry {
    fn from(model: activity_logs::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            game_id: model.game_id,
            action: model.action,
            meta: model.meta,
            timestamp: model.timestamp,
        }
    }
}

/// An entry as the listing endpoints show it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityDetails {
    #[serde(flatten)]
    pub entry: ActivityEntry,
    pub user: UserSummary,
    pub game: GameSummary,
}

impl From<ActivityWithRefs> for ActivityDetails {
    fn from((entry, user, game): ActivityWithRefs) -> Self {
        Self {
            entry: ActivityEntry::from(entry),
            user: UserSummary::from(user),
            game: GameSummary::from(game),
        }
    }
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    game_id: i64,
    action: ActivityAction,
    meta: Json,
) -> Result<ActivityEntry, DomainError> {
    let entry = activity_adapter::insert(
        conn,
        activity_adapter::ActivityCreate {
            user_id,
            game_id,
            action,
            meta,
        },
    )
    .await?;
    Ok(ActivityEntry::from(entry))
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: ActivityFilter,
) -> Result<Vec<ActivityDetails>, DomainError> {
    let rows = activity_adapter::list(conn, filter).await?;
    Ok(rows.into_iter().map(ActivityDetails::from).collect())
}

/// Per-action counts for one user, unknown stored actions skipped.
pub async fn count_by_action<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<(ActivityAction, i64)>, DomainError> {
    let rows = activity_adapter::count_by_action(conn, user_id).await?;
    Ok(rows
        .into_iter()
        .filter_map(|(action, count)| ActivityAction::parse(&action).map(|a| (a, count)))
        .collect())
}

pub async fn delete_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<(), DomainError> {
    match activity_adapter::delete_by_id(conn, id).await? {
        0 => Err(DomainError::not_found(
            NotFoundKind::Activity,
            format!("Activity {id} not found"),
        )),
        _ => Ok(()),
    }
}
