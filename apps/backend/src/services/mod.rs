pub mod activities;
pub mod audit;
pub mod game_lists;
pub mod games;
pub mod ratings;
pub mod reviews;
pub mod users;
