//! SeaORM adapters: query functions generic over `ConnectionTrait`, returning `DbErr`.

pub mod activity_logs_sea;
pub mod game_lists_sea;
pub mod games_sea;
pub mod reviews_sea;
pub mod users_sea;
