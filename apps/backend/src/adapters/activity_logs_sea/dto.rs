//! DTOs for activity_logs_sea adapter.

use sea_orm::prelude::Json;

use crate::entities::activity_logs::ActivityAction;

/// DTO for appending an audit entry.
#[derive(Debug, Clone)]
pub struct ActivityCreate {
    pub user_id: i64,
    pub game_id: i64,
    pub action: ActivityAction,
    pub meta: Json,
}

/// Filter for audit listings. All entries are returned newest first.
#[derive(Debug, Clone, Default)]
pub struct ActivityFilter {
    pub user_id: Option<i64>,
    pub game_id: Option<i64>,
    pub action: Option<ActivityAction>,
    pub limit: Option<u64>,
}

impl ActivityFilter {
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn for_game(game_id: i64) -> Self {
        Self {
            game_id: Some(game_id),
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: Option<ActivityAction>) -> Self {
        self.action = action;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}
