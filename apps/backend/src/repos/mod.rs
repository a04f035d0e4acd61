//! Repository functions: domain models over the SeaORM adapters, errors as `DomainError`.

pub mod activity_logs;
pub mod game_lists;
pub mod games;
pub mod reviews;
pub mod users;
