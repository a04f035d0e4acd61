use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Closed set of audited user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    #[sea_orm(string_value = "added_to_wishlist")]
    AddedToWishlist,
    #[sea_orm(string_value = "removed_from_wishlist")]
    RemovedFromWishlist,
    #[sea_orm(string_value = "marked_as_played")]
    MarkedAsPlayed,
    #[sea_orm(string_value = "review_submitted")]
    ReviewSubmitted,
    #[sea_orm(string_value = "review_updated")]
    ReviewUpdated,
    #[sea_orm(string_value = "review_deleted")]
    ReviewDeleted,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddedToWishlist => "added_to_wishlist",
            Self::RemovedFromWishlist => "removed_from_wishlist",
            Self::MarkedAsPlayed => "marked_as_played",
            Self::ReviewSubmitted => "review_submitted",
            Self::ReviewUpdated => "review_updated",
            Self::ReviewDeleted => "review_deleted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        <Self as Iterable>::iter().find(|a| a.as_str() == s)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "user_id")]
    pub user_id: i64,
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    pub action: ActivityAction,
    #[sea_orm(column_type = "Json")]
    pub meta: Json,
    pub timestamp: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id",
        on_delete = "Cascade"
    )]
    Game,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
