use gameshelf_backend::entities::users::Role;
use gameshelf_backend::errors::ErrorCode;
use gameshelf_backend::services::reviews::ReviewService;

use crate::support::factory::{aggregate, create_admin, create_game, create_user, draft};
use crate::support::test_state::test_state;

#[tokio::test]
async fn non_owner_cannot_update() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = ReviewService::new();
    let game = create_game(db).await.unwrap();
    let owner = create_user(db).await.unwrap();
    let other = create_user(db).await.unwrap();
    let review = svc.create_review(db, owner.id, game.id, draft(4)).await.unwrap();

    let err = svc
        .update_review(db, review.id, other.id, draft(1))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::NotReviewOwner);
    assert_eq!(err.status().as_u16(), 403);
    assert_eq!(svc.get_review(db, review.id).await.unwrap().review.rating, 4);
    assert_eq!(aggregate(db, game.id).await, (4.0, 1));
}

#[tokio::test]
async fn admin_cannot_edit_someone_elses_review() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = ReviewService::new();
    let game = create_game(db).await.unwrap();
    let owner = create_user(db).await.unwrap();
    let admin = create_admin(db).await.unwrap();
    let review = svc.create_review(db, owner.id, game.id, draft(4)).await.unwrap();

    let err = svc
        .update_review(db, review.id, admin.id, draft(2))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotReviewOwner);
}

#[tokio::test]
async fn non_owner_cannot_delete() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = ReviewService::new();
    let game = create_game(db).await.unwrap();
    let owner = create_user(db).await.unwrap();
    let other = create_user(db).await.unwrap();
    let review = svc.create_review(db, owner.id, game.id, draft(2)).await.unwrap();

    let err = svc
        .delete_review(db, review.id, other.id, Role::User)
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::NotReviewOwner);
    assert!(svc.get_review(db, review.id).await.is_ok());
    assert_eq!(aggregate(db, game.id).await, (2.0, 1));
}

#[tokio::test]
async fn admin_can_delete_any_review() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = ReviewService::new();
    let game = create_game(db).await.unwrap();
    let owner = create_user(db).await.unwrap();
    let admin = create_admin(db).await.unwrap();
    let review = svc.create_review(db, owner.id, game.id, draft(2)).await.unwrap();

    svc.delete_review(db, review.id, admin.id, Role::Admin)
        .await
        .unwrap();

    let err = svc.get_review(db, review.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ReviewNotFound);
    assert_eq!(aggregate(db, game.id).await, (0.0, 0));
}

#[tokio::test]
async fn missing_review_is_not_found() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let user = create_user(db).await.unwrap();

    let err = ReviewService::new()
        .update_review(db, 777_777, user.id, draft(3))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ReviewNotFound);
    assert_eq!(err.status().as_u16(), 404);
}
