//! SeaORM adapter for the audit trail. Insert-only apart from the
//! administrative delete.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, LoaderTrait, NotSet, Order,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::{activity_logs, games, users};

pub mod dto;

pub use dto::{ActivityCreate, ActivityFilter};

/// An entry with the user and game it refers to.
pub type ActivityWithRefs = (activity_logs::Model, users::Model, games::Model);

pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ActivityCreate,
) -> Result<activity_logs::Model, sea_orm::DbErr> {
    activity_logs::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        game_id: Set(dto.game_id),
        action: Set(dto.action),
        meta: Set(dto.meta),
        timestamp: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<activity_logs::Model>, sea_orm::DbErr> {
    activity_logs::Entity::find_by_id(id).one(conn).await
}

/// Newest first, each entry with its user and game.
pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    filter: ActivityFilter,
) -> Result<Vec<ActivityWithRefs>, sea_orm::DbErr> {
    let mut query = activity_logs::Entity::find();
    if let Some(user_id) = filter.user_id {
        query = query.filter(activity_logs::Column::UserId.eq(user_id));
    }
    if let Some(game_id) = filter.game_id {
        query = query.filter(activity_logs::Column::GameId.eq(game_id));
    }
    if let Some(action) = filter.action {
        query = query.filter(activity_logs::Column::Action.eq(action));
    }
    query = query
        .order_by(activity_logs::Column::Timestamp, Order::Desc)
        .order_by(activity_logs::Column::Id, Order::Desc);
    if let Some(limit) = filter.limit {
        query = query.limit(limit);
    }

    let rows = query.find_also_related(users::Entity).all(conn).await?;
    let (entries, users): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
    let games = entries.load_one(games::Entity, conn).await?;
    Ok(entries
        .into_iter()
        .zip(users)
        .zip(games)
        .filter_map(|((entry, user), game)| Some((entry, user?, game?)))
        .collect())
}

/// `(action, count)` pairs for one user, as stored strings.
pub async fn count_by_action<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<(String, i64)>, sea_orm::DbErr> {
    activity_logs::Entity::find()
        .select_only()
        .column(activity_logs::Column::Action)
        .column_as(Expr::col(activity_logs::Column::Id).count(), "action_count")
        .filter(activity_logs::Column::UserId.eq(user_id))
        .group_by(activity_logs::Column::Action)
        .into_tuple()
        .all(conn)
        .await
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = activity_logs::Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}
