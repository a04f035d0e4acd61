mod error_shape;
mod game_lists;
mod games;
mod health;

use gameshelf_backend::repos::users::User;
use gameshelf_backend::state::app_state::AppState;
use sea_orm::DatabaseConnection;

use crate::support::auth::bearer_header;
use crate::support::factory::{create_admin, create_user};
use crate::support::test_state::test_state;

/// State plus a handle on its pool for seeding fixtures.
pub(crate) async fn seeded_state() -> (AppState, DatabaseConnection) {
    let state = test_state().await;
    let db = state.db().expect("db").clone();
    (state, db)
}

pub(crate) async fn user_with_token(state: &AppState, db: &DatabaseConnection) -> (User, String) {
    let user = create_user(db).await.expect("user");
    let bearer = bearer_header(&user, &state.security);
    (user, bearer)
}

pub(crate) async fn admin_with_token(state: &AppState, db: &DatabaseConnection) -> (User, String) {
    let admin = create_admin(db).await.expect("admin");
    let bearer = bearer_header(&admin, &state.security);
    (admin, bearer)
}
