use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum Platform {
    #[sea_orm(string_value = "PS4")]
    #[serde(rename = "PS4")]
    Ps4,
    #[sea_orm(string_value = "PS5")]
    #[serde(rename = "PS5")]
    Ps5,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ps4 => "PS4",
            Self::Ps5 => "PS5",
        }
    }

    /// Case-insensitive; `None` outside the supported set.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PS4" => Some(Self::Ps4),
            "PS5" => Some(Self::Ps5),
            _ => None,
        }
    }
}

/// Genre names stored as a JSON array.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Genres(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub platform: Platform,
    #[sea_orm(column_type = "Json")]
    pub genres: Genres,
    #[sea_orm(column_name = "release_date")]
    pub release_date: Date,
    pub publisher: String,
    #[sea_orm(column_name = "avg_rating", column_type = "Double")]
    pub avg_rating: f64,
    #[sea_orm(column_name = "total_reviews")]
    pub total_reviews: i32,
    /// Bumped on every write; guards the aggregate update
    pub version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::activity_logs::Entity")]
    ActivityLogs,
    #[sea_orm(has_many = "super::game_list_entries::Entity")]
    GameListEntries,
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::activity_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLogs.def()
    }
}

impl Related<super::game_list_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameListEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
