//! SeaORM adapter for game repository - generic over ConnectionTrait.

use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, Order, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::games;
use crate::entities::games::Platform;
use crate::infra::db_errors::OPTIMISTIC_LOCK_PREFIX;

pub mod dto;

pub use dto::{GameCreate, GameSort, GameUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

/// Apply a version-checked update, then refetch.
///
/// Bumps `version` and `updated_at`, filters on id and the expected version,
/// and uses `rows_affected` to tell a missing row from a lost race. The
/// caller provides a closure that configures entity-specific columns.
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    expected_version: i32,
    configure_update: F,
) -> Result<games::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<games::Entity>) -> sea_orm::UpdateMany<games::Entity>,
{
    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(games::Entity::update_many())
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            games::Column::Version,
            Expr::col(games::Column::Version).add(1),
        )
        .filter(games::Column::Id.eq(id))
        .filter(games::Column::Version.eq(expected_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, id).await? {
            Some(game) => Err(sea_orm::DbErr::Custom(format!(
                "{OPTIMISTIC_LOCK_PREFIX}{{\"expected\":{},\"actual\":{}}}",
                expected_version, game.version
            ))),
            None => Err(sea_orm::DbErr::RecordNotFound(format!(
                "Game {id} not found"
            ))),
        };
    }

    require_game(conn, id).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

/// Find game by ID or return RecordNotFound error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("Game {game_id} not found")))
}

/// `SELECT ... FOR UPDATE` on the game row. SQLite has no row locks; the
/// builder drops the clause there and the writing transaction's database
/// lock does the serializing instead.
pub async fn lock_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find_by_id(game_id)
        .lock_exclusive()
        .one(conn)
        .await
}

pub async fn find_by_title_platform<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    title: &str,
    platform: Platform,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Title.eq(title))
        .filter(games::Column::Platform.eq(platform))
        .one(conn)
        .await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    platform: Option<Platform>,
    sort: GameSort,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    let mut query = games::Entity::find();
    if let Some(p) = platform {
        query = query.filter(games::Column::Platform.eq(p));
    }

    let query = match sort {
        GameSort::Rating => query
            .order_by(games::Column::AvgRating, Order::Desc)
            .order_by(games::Column::TotalReviews, Order::Desc),
        GameSort::Newest => query.order_by(games::Column::ReleaseDate, Order::Desc),
        GameSort::Oldest => query.order_by(games::Column::ReleaseDate, Order::Asc),
        GameSort::Title => query.order_by(games::Column::Title, Order::Asc),
    };

    query.order_by(games::Column::Id, Order::Asc).all(conn).await
}

/// Case-insensitive substring match on the title.
pub async fn search_title<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    needle: &str,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    let pattern = format!("%{}%", needle.to_lowercase());
    games::Entity::find()
        .filter(Expr::expr(Func::lower(Expr::col(games::Column::Title))).like(pattern))
        .order_by(games::Column::Title, Order::Asc)
        .all(conn)
        .await
}

pub async fn top_rated<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .order_by(games::Column::AvgRating, Order::Desc)
        .order_by(games::Column::TotalReviews, Order::Desc)
        .order_by(games::Column::Id, Order::Asc)
        .limit(limit)
        .all(conn)
        .await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        platform: Set(dto.platform),
        genres: Set(dto::genres(dto.genres)),
        release_date: Set(dto.release_date),
        publisher: Set(dto.publisher),
        avg_rating: Set(0.0),
        total_reviews: Set(0),
        version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };

    game_active.insert(conn).await
}

pub async fn update_details<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    expected_version: i32,
    dto: GameUpdate,
) -> Result<games::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, id, expected_version, |mut update| {
        if let Some(title) = dto.title {
            update = update.col_expr(games::Column::Title, Expr::value(title));
        }
        if let Some(platform) = dto.platform {
            update = update.col_expr(games::Column::Platform, Expr::value(platform));
        }
        if let Some(genres) = dto.genres {
            update = update.col_expr(games::Column::Genres, Expr::value(dto::genres(genres)));
        }
        if let Some(release_date) = dto.release_date {
            update = update.col_expr(games::Column::ReleaseDate, Expr::value(release_date));
        }
        if let Some(publisher) = dto.publisher {
            update = update.col_expr(games::Column::Publisher, Expr::value(publisher));
        }
        update
    })
    .await
}

/// Write the derived rating fields, guarded by `expected_version`.
pub async fn set_rating_aggregate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    expected_version: i32,
    avg_rating: f64,
    total_reviews: i32,
) -> Result<games::Model, sea_orm::DbErr> {
    optimistic_update_then_fetch(conn, id, expected_version, |update| {
        update
            .col_expr(games::Column::AvgRating, Expr::value(avg_rating))
            .col_expr(games::Column::TotalReviews, Expr::value(total_reviews))
    })
    .await
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = games::Entity::delete_by_id(game_id).exec(conn).await?;
    Ok(result.rows_affected)
}
