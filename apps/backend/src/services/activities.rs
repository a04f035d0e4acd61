//! Read side of the audit trail plus the administrative delete.

use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::info;

use crate::entities::activity_logs::ActivityAction;
use crate::error::AppError;
use crate::repos::activity_logs::{self, ActivityDetails, ActivityFilter};

pub const DEFAULT_LIMIT: u64 = 50;
pub const DEFAULT_ADMIN_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 500;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionCount {
    pub action: ActivityAction,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityStats {
    pub total: i64,
    pub breakdown: Vec<ActionCount>,
    pub most_recent: Option<ActivityDetails>,
}

/// `None` means no filter; an unrecognised name is a validation error.
pub fn parse_action(raw: Option<&str>) -> Result<Option<ActivityAction>, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => ActivityAction::parse(s)
            .map(Some)
            .ok_or_else(|| AppError::invalid(format!("Unknown activity action '{s}'"))),
    }
}

fn effective_limit(limit: Option<u64>, default: u64) -> u64 {
    limit.unwrap_or(default).clamp(1, MAX_LIMIT)
}

/// Sorted by count, highest first; ties by action name.
fn breakdown(counts: Vec<(ActivityAction, i64)>) -> Vec<ActionCount> {
    let mut out: Vec<ActionCount> = counts
        .into_iter()
        .map(|(action, count)| ActionCount { action, count })
        .collect();
    out.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.action.as_str().cmp(b.action.as_str()))
    });
    out
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ActivityService;

impl ActivityService {
    pub fn new() -> Self {
        Self
    }

    pub async fn list_for_user(
        &self,
        db: &DatabaseConnection,
        user_id: i64,
        action: Option<&str>,
        limit: Option<u64>,
    ) -> Result<Vec<ActivityDetails>, AppError> {
        let filter = ActivityFilter::for_user(user_id)
            .with_action(parse_action(action)?)
            .with_limit(effective_limit(limit, DEFAULT_LIMIT));
        Ok(activity_logs::list(db, filter).await?)
    }

    pub async fn list_for_game(
        &self,
        db: &DatabaseConnection,
        game_id: i64,
        action: Option<&str>,
        limit: Option<u64>,
    ) -> Result<Vec<ActivityDetails>, AppError> {
        let filter = ActivityFilter::for_game(game_id)
            .with_action(parse_action(action)?)
            .with_limit(effective_limit(limit, DEFAULT_LIMIT));
        Ok(activity_logs::list(db, filter).await?)
    }

    pub async fn list_all(
        &self,
        db: &DatabaseConnection,
        action: Option<&str>,
        limit: Option<u64>,
    ) -> Result<Vec<ActivityDetails>, AppError> {
        let filter = ActivityFilter::default()
            .with_action(parse_action(action)?)
            .with_limit(effective_limit(limit, DEFAULT_ADMIN_LIMIT));
        Ok(activity_logs::list(db, filter).await?)
    }

    pub async fn stats(&self, db: &DatabaseConnection, user_id: i64) -> Result<ActivityStats, AppError> {
        let counts = activity_logs::count_by_action(db, user_id).await?;
        let total = counts.iter().map(|(_, n)| n).sum::<i64>();
        let most_recent = activity_logs::list(db, ActivityFilter::for_user(user_id).with_limit(1))
            .await?
            .into_iter()
            .next();

        Ok(ActivityStats {
            total,
            breakdown: breakdown(counts),
            most_recent,
        })
    }

    /// Administrative removal; never touches game aggregates.
    pub async fn delete(&self, db: &DatabaseConnection, activity_id: i64) -> Result<(), AppError> {
        activity_logs::delete_entry(db, activity_id).await?;
        info!(activity_id, "activity deleted");
        Ok(())
    }
}
