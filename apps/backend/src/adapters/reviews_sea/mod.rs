//! SeaORM adapter for reviews.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, LoaderTrait, NotSet, Order,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::{games, reviews, users};

pub mod dto;

pub use dto::{RatingStats, ReviewCreate, ReviewSort, ReviewUpdate};

/// A review with its author and game. Rows whose author or game is gone are
/// dropped; the foreign keys cascade, so that only happens mid-delete.
pub type ReviewWithRefs = (reviews::Model, users::Model, games::Model);

async fn with_games<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rows: Vec<(reviews::Model, Option<users::Model>)>,
) -> Result<Vec<ReviewWithRefs>, sea_orm::DbErr> {
    let (reviews, authors): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
    let games = reviews.load_one(games::Entity, conn).await?;
    Ok(reviews
        .into_iter()
        .zip(authors)
        .zip(games)
        .filter_map(|((review, author), game)| Some((review, author?, game?)))
        .collect())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    review_id: i64,
) -> Result<Option<reviews::Model>, sea_orm::DbErr> {
    reviews::Entity::find_by_id(review_id).one(conn).await
}

pub async fn find_with_refs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    review_id: i64,
) -> Result<Option<ReviewWithRefs>, sea_orm::DbErr> {
    let rows = reviews::Entity::find_by_id(review_id)
        .find_also_related(users::Entity)
        .all(conn)
        .await?;
    Ok(with_games(conn, rows).await?.into_iter().next())
}

pub async fn find_by_user_and_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    game_id: i64,
) -> Result<Option<reviews::Model>, sea_orm::DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::UserId.eq(user_id))
        .filter(reviews::Column::GameId.eq(game_id))
        .one(conn)
        .await
}

pub async fn create_review<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ReviewCreate,
) -> Result<reviews::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    reviews::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        game_id: Set(dto.game_id),
        rating: Set(dto.rating),
        title: Set(dto.title),
        body: Set(dto.body),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

pub async fn update_review<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ReviewUpdate,
) -> Result<reviews::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = reviews::Entity::update_many()
        .col_expr(reviews::Column::Rating, Expr::value(dto.rating))
        .col_expr(reviews::Column::Title, Expr::value(dto.title))
        .col_expr(reviews::Column::Body, Expr::value(dto.body))
        .col_expr(reviews::Column::UpdatedAt, Expr::value(now))
        .filter(reviews::Column::Id.eq(dto.id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "Review {} not found",
            dto.id
        )));
    }

    find_by_id(conn, dto.id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound(format!("Review {} not found", dto.id)))
}

pub async fn delete_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    review_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = reviews::Entity::delete_by_id(review_id).exec(conn).await?;
    Ok(result.rows_affected)
}

pub async fn list_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    sort: ReviewSort,
) -> Result<Vec<ReviewWithRefs>, sea_orm::DbErr> {
    let query = reviews::Entity::find().filter(reviews::Column::GameId.eq(game_id));
    let query = match sort {
        ReviewSort::RatingHigh => query
            .order_by(reviews::Column::Rating, Order::Desc)
            .order_by(reviews::Column::CreatedAt, Order::Desc),
        ReviewSort::RatingLow => query
            .order_by(reviews::Column::Rating, Order::Asc)
            .order_by(reviews::Column::CreatedAt, Order::Desc),
        ReviewSort::Oldest => query.order_by(reviews::Column::CreatedAt, Order::Asc),
        ReviewSort::Newest => query.order_by(reviews::Column::CreatedAt, Order::Desc),
    };
    let rows = query
        .order_by(reviews::Column::Id, Order::Desc)
        .find_also_related(users::Entity)
        .all(conn)
        .await?;
    with_games(conn, rows).await
}

/// Newest first.
pub async fn list_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<ReviewWithRefs>, sea_orm::DbErr> {
    let rows = reviews::Entity::find()
        .filter(reviews::Column::UserId.eq(user_id))
        .order_by(reviews::Column::CreatedAt, Order::Desc)
        .order_by(reviews::Column::Id, Order::Desc)
        .find_also_related(users::Entity)
        .all(conn)
        .await?;
    with_games(conn, rows).await
}

/// One `COUNT`/`SUM` over the game's reviews, served by `ix_reviews_game_id`.
pub async fn rating_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<RatingStats, sea_orm::DbErr> {
    let row: Option<(i64, Option<i64>)> = reviews::Entity::find()
        .select_only()
        .column_as(Expr::col(reviews::Column::Id).count(), "review_count")
        .column_as(Expr::col(reviews::Column::Rating).sum(), "rating_sum")
        .filter(reviews::Column::GameId.eq(game_id))
        .into_tuple()
        .one(conn)
        .await?;

    Ok(match row {
        Some((count, sum)) => RatingStats {
            count,
            sum: sum.unwrap_or(0),
        },
        None => RatingStats::default(),
    })
}
