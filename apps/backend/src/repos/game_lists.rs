//! Wishlist/played repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::game_lists_sea as lists_adapter;
use crate::entities::game_list_entries::{self, ListKind};
use crate::errors::domain::DomainError;
use crate::repos::games::GameSummary;

/// Raw membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListEntry {
    pub id: i64,
    pub game_id: i64,
    pub list: ListKind,
    pub added_at: OffsetDateTime,
}

impl From<game_list_entries::Model> for ListEntry {
    fn from(model: game_list_entries::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            list: model.list,
            added_at: model.added_at,
        }
    }
}

/// A list entry with its game. For played entries `at` is the completion time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub game: GameSummary,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

/// Both collections of one user, each in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserGameList {
    pub wishlist: Vec<ListItem>,
    pub played: Vec<ListItem>,
}

pub async fn find_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    game_id: i64,
) -> Result<Option<ListEntry>, DomainError> {
    let entry = lists_adapter::find_entry(conn, user_id, game_id).await?;
    Ok(entry.map(ListEntry::from))
}

pub async fn load<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<UserGameList, DomainError> {
    let rows = lists_adapter::list_with_games(conn, user_id, None).await?;
    let mut out = UserGameList::default();
    for (entry, game) in rows {
        // cascade deletes keep this from happening; skip rather than fail
        let Some(game) = game else { continue };
        let item = ListItem {
            game: GameSummary::from(game),
            at: entry.added_at,
        };
        match entry.list {
            ListKind::Wishlist => out.wishlist.push(item),
            ListKind::Played => out.played.push(item),
        }
    }
    Ok(out)
}

pub async fn load_one<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    list: ListKind,
) -> Result<Vec<ListItem>, DomainError> {
    let rows = lists_adapter::list_with_games(conn, user_id, Some(list)).await?;
    Ok(rows
        .into_iter()
        .filter_map(|(entry, game)| {
            game.map(|g| ListItem {
                game: GameSummary::from(g),
                at: entry.added_at,
            })
        })
        .collect())
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    game_id: i64,
    list: ListKind,
) -> Result<ListEntry, DomainError> {
    let now = OffsetDateTime::now_utc();
    let entry = lists_adapter::insert(conn, user_id, game_id, list, now).await?;
    Ok(ListEntry::from(entry))
}

pub async fn move_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entry_id: i64,
    to: ListKind,
) -> Result<(), DomainError> {
    lists_adapter::move_entry(conn, entry_id, to, OffsetDateTime::now_utc()).await?;
    Ok(())
}

/// Returns whether a row was removed.
pub async fn remove<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    game_id: i64,
    list: ListKind,
) -> Result<bool, DomainError> {
    Ok(lists_adapter::delete_entry(conn, user_id, game_id, list).await? > 0)
}
