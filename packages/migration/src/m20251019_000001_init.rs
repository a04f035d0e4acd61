use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Country,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    Title,
    Platform,
    Genres,
    ReleaseDate,
    Publisher,
    AvgRating,
    TotalReviews,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Reviews {
    Table,
    Id,
    UserId,
    GameId,
    Rating,
    Title,
    Body,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ActivityLogs {
    Table,
    Id,
    UserId,
    GameId,
    Action,
    Meta,
    Timestamp,
}

#[derive(Iden)]
enum GameListEntries {
    Table,
    Id,
    UserId,
    GameId,
    List,
    AddedAt,
}

fn id_col<T: Iden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn timestamp_col<T: Iden + 'static>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_col(Users::Id))
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Country).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string_len(16)
                            .not_null()
                            .default("user"),
                    )
                    .col(timestamp_col(Users::CreatedAt))
                    .col(timestamp_col(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_users_email")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_users_username")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(id_col(Games::Id))
                    .col(ColumnDef::new(Games::Title).string().not_null())
                    .col(ColumnDef::new(Games::Platform).string_len(8).not_null())
                    .col(ColumnDef::new(Games::Genres).json().not_null())
                    .col(ColumnDef::new(Games::ReleaseDate).date().not_null())
                    .col(ColumnDef::new(Games::Publisher).string().not_null())
                    .col(
                        ColumnDef::new(Games::AvgRating)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Games::TotalReviews)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(timestamp_col(Games::CreatedAt))
                    .col(timestamp_col(Games::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_games_title_platform")
                    .table(Games::Table)
                    .col(Games::Title)
                    .col(Games::Platform)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_games_avg_rating")
                    .table(Games::Table)
                    .col(Games::AvgRating)
                    .to_owned(),
            )
            .await?;

        // reviews
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(id_col(Reviews::Id))
                    .col(ColumnDef::new(Reviews::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Reviews::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Reviews::Rating).small_integer().not_null())
                    .col(ColumnDef::new(Reviews::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Reviews::Body).text().not_null())
                    .col(timestamp_col(Reviews::CreatedAt))
                    .col(timestamp_col(Reviews::UpdatedAt))
                    .check(Expr::col(Reviews::Rating).between(1, 5))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_user_id")
                            .from(Reviews::Table, Reviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_game_id")
                            .from(Reviews::Table, Reviews::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // one review per (user, game)
        manager
            .create_index(
                Index::create()
                    .name("ux_reviews_user_game")
                    .table(Reviews::Table)
                    .col(Reviews::UserId)
                    .col(Reviews::GameId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_reviews_game_id")
                    .table(Reviews::Table)
                    .col(Reviews::GameId)
                    .to_owned(),
            )
            .await?;

        // activity_logs
        manager
            .create_table(
                Table::create()
                    .table(ActivityLogs::Table)
                    .if_not_exists()
                    .col(id_col(ActivityLogs::Id))
                    .col(ColumnDef::new(ActivityLogs::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ActivityLogs::GameId).big_integer().not_null())
                    .col(ColumnDef::new(ActivityLogs::Action).string_len(32).not_null())
                    .col(ColumnDef::new(ActivityLogs::Meta).json().not_null())
                    .col(timestamp_col(ActivityLogs::Timestamp))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_logs_user_id")
                            .from(ActivityLogs::Table, ActivityLogs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_logs_game_id")
                            .from(ActivityLogs::Table, ActivityLogs::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_activity_logs_user_ts")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::UserId)
                    .col(ActivityLogs::Timestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_activity_logs_game_ts")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::GameId)
                    .col(ActivityLogs::Timestamp)
                    .to_owned(),
            )
            .await?;

        // game_list_entries
        manager
            .create_table(
                Table::create()
                    .table(GameListEntries::Table)
                    .if_not_exists()
                    .col(id_col(GameListEntries::Id))
                    .col(
                        ColumnDef::new(GameListEntries::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameListEntries::GameId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GameListEntries::List).string_len(16).not_null())
                    .col(timestamp_col(GameListEntries::AddedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_list_entries_user_id")
                            .from(GameListEntries::Table, GameListEntries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_list_entries_game_id")
                            .from(GameListEntries::Table, GameListEntries::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // a game sits in at most one of a user's lists
        manager
            .create_index(
                Index::create()
                    .name("ux_game_list_entries_user_game")
                    .table(GameListEntries::Table)
                    .col(GameListEntries::UserId)
                    .col(GameListEntries::GameId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order; indexes go with their tables
        manager
            .drop_table(Table::drop().table(GameListEntries::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ActivityLogs::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
