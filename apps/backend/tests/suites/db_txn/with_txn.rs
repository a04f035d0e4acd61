use gameshelf_backend::adapters::users_sea::UserCreate;
use gameshelf_backend::db::txn::with_txn;
use gameshelf_backend::errors::ErrorCode;
use gameshelf_backend::repos::users;
use gameshelf_backend::services::game_lists::GameListService;
use gameshelf_backend::services::reviews::ReviewService;
use gameshelf_backend::AppError;

use crate::support::factory::{aggregate, create_game, create_user, draft};
use crate::support::test_state::test_state;

fn user_dto(name: &str) -> UserCreate {
    UserCreate::new(
        name,
        format!("{name}@example.test"),
        "placeholder-hash",
        "NZ",
    )
}

#[tokio::test]
async fn ok_result_is_returned_but_not_committed() {
    let state = test_state().await;
    let db = state.db().expect("db");

    let created = with_txn(db, |txn| {
        Box::pin(async move { Ok(users::create_user(txn, user_dto("rolled_back")).await?) })
    })
    .await
    .unwrap();
    assert_eq!(created.username, "rolled_back");

    assert!(!users::email_exists(db, "rolled_back@example.test")
        .await
        .unwrap());
}

#[tokio::test]
async fn err_result_rolls_back_and_keeps_the_error() {
    let state = test_state().await;
    let db = state.db().expect("db");

    let err = with_txn(db, |txn| {
        Box::pin(async move {
            users::create_user(txn, user_dto("failed_write")).await?;
            Err::<(), _>(AppError::invalid("stop here"))
        })
    })
    .await
    .unwrap_err();

    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert!(!users::username_exists(db, "failed_write").await.unwrap());
}

#[tokio::test]
async fn service_units_leave_no_rows_behind() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();

    let review = ReviewService::new()
        .create_review(db, user.id, game.id, draft(5))
        .await
        .unwrap();
    assert_eq!(review.rating, 5);

    let err = ReviewService::new()
        .get_review(db, review.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ReviewNotFound);
    assert_eq!(aggregate(db, game.id).await, (0.0, 0));

    let lists = GameListService::new()
        .add_to_wishlist(db, user.id, game.id)
        .await
        .unwrap();
    // the reload after the unit no longer sees the rolled-back row
    assert!(lists.wishlist.is_empty());
}
