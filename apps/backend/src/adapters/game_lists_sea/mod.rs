//! SeaORM adapter for wishlist/played entries.
//!
//! One row per (user, game); the `list` column says which collection holds it.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::game_list_entries::{self, ListKind};
use crate::entities::games;

pub async fn find_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    game_id: i64,
) -> Result<Option<game_list_entries::Model>, sea_orm::DbErr> {
    game_list_entries::Entity::find()
        .filter(game_list_entries::Column::UserId.eq(user_id))
        .filter(game_list_entries::Column::GameId.eq(game_id))
        .one(conn)
        .await
}

/// Entries in insertion order, each with its game.
pub async fn list_with_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    list: Option<ListKind>,
) -> Result<Vec<(game_list_entries::Model, Option<games::Model>)>, sea_orm::DbErr> {
    let mut query = game_list_entries::Entity::find()
        .filter(game_list_entries::Column::UserId.eq(user_id));
    if let Some(kind) = list {
        query = query.filter(game_list_entries::Column::List.eq(kind));
    }
    query
        .order_by(game_list_entries::Column::AddedAt, Order::Asc)
        .order_by(game_list_entries::Column::Id, Order::Asc)
        .find_also_related(games::Entity)
        .all(conn)
        .await
}

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    game_id: i64,
    list: ListKind,
    at: OffsetDateTime,
) -> Result<game_list_entries::Model, sea_orm::DbErr> {
    game_list_entries::ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        game_id: Set(game_id),
        list: Set(list),
        added_at: Set(at),
    }
    .insert(conn)
    .await
}

/// Move an existing entry to another collection, stamping the new time.
pub async fn move_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    entry_id: i64,
    to: ListKind,
    at: OffsetDateTime,
) -> Result<u64, sea_orm::DbErr> {
    let result = game_list_entries::Entity::update_many()
        .col_expr(game_list_entries::Column::List, Expr::value(to))
        .col_expr(game_list_entries::Column::AddedAt, Expr::value(at))
        .filter(game_list_entries::Column::Id.eq(entry_id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn delete_entry<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    game_id: i64,
    list: ListKind,
) -> Result<u64, sea_orm::DbErr> {
    let result = game_list_entries::Entity::delete_many()
        .filter(game_list_entries::Column::UserId.eq(user_id))
        .filter(game_list_entries::Column::GameId.eq(game_id))
        .filter(game_list_entries::Column::List.eq(list))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
