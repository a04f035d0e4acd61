//! Fixture builders. Games and users go through the repos/services so
//! fixtures obey the same invariants as production rows.

use backend_test_support::unique_helpers::{unique_email, unique_str, unique_username};
use gameshelf_backend::adapters::users_sea::UserCreate;
use gameshelf_backend::entities::users::Role;
use gameshelf_backend::repos::games::Game;
use gameshelf_backend::repos::users::{self, User};
use gameshelf_backend::services::games::{GameService, NewGame};
use gameshelf_backend::services::reviews::ReviewDraft;
use gameshelf_backend::AppError;
use sea_orm::DatabaseConnection;
use time::macros::date;

// Never verified; users that need to log in are registered through UserService.
const PLACEHOLDER_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$placeholder";

pub async fn create_user_with_role(db: &DatabaseConnection, role: Role) -> Result<User, AppError> {
    let dto = UserCreate::new(
        unique_username("player"),
        unique_email("player"),
        PLACEHOLDER_HASH,
        "NZ",
    )
    .with_role(role);
    Ok(users::create_user(db, dto).await?)
}

pub async fn create_user(db: &DatabaseConnection) -> Result<User, AppError> {
    create_user_with_role(db, Role::User).await
}

pub async fn create_admin(db: &DatabaseConnection) -> Result<User, AppError> {
    create_user_with_role(db, Role::Admin).await
}

/// PS5 action game with a unique title.
pub async fn create_game(db: &DatabaseConnection) -> Result<Game, AppError> {
    create_game_with(db, "PS5", &["Action"]).await
}

pub async fn create_game_with(
    db: &DatabaseConnection,
    platform: &str,
    genres: &[&str],
) -> Result<Game, AppError> {
    let new_game = NewGame::new(
        &unique_str("Game"),
        platform,
        genres.iter().map(|g| g.to_string()).collect(),
        date!(2023 - 03 - 14),
        "Test Publisher",
    )?;
    GameService::new().create(db, new_game).await
}

pub fn draft(rating: i64) -> ReviewDraft {
    ReviewDraft::new(rating, "Worth playing", "Finished the main story in a weekend.")
        .expect("fixture draft should be valid")
}

/// `(avg_rating, total_reviews)` as currently stored.
pub async fn aggregate(db: &DatabaseConnection, game_id: i64) -> (f64, i32) {
    let game = GameService::new()
        .get(db, game_id)
        .await
        .expect("game should exist");
    (game.avg_rating, game.total_reviews)
}
