//! Storage conflicts inside the review unit are retried and then surfaced
//! as `STORAGE_CONFLICT`, with nothing from any attempt left behind. The
//! games trigger reports lock contention on every attempt, so these run on
//! the SQLite profile only.

use gameshelf_backend::entities::users::Role;
use gameshelf_backend::errors::ErrorCode;
use gameshelf_backend::services::activities::ActivityService;
use gameshelf_backend::services::reviews::ReviewService;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection};

use crate::support::factory::{aggregate, create_game, create_user, draft};
use crate::support::test_state::test_state;

const LOCKED_GAME_UPDATE: &str = "CREATE TRIGGER locked_game_update BEFORE UPDATE ON games \
     BEGIN SELECT RAISE(ABORT, 'database is locked'); END;";

async fn lock_games(db: &DatabaseConnection) -> bool {
    if db.get_database_backend() != DatabaseBackend::Sqlite {
        return false;
    }
    db.execute_unprepared(LOCKED_GAME_UPDATE)
        .await
        .expect("trigger should install");
    true
}

async fn unlock_games(db: &DatabaseConnection) {
    db.execute_unprepared("DROP TRIGGER locked_game_update;")
        .await
        .expect("trigger should drop");
}

#[tokio::test]
async fn create_gives_up_with_storage_conflict() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();
    if !lock_games(db).await {
        return;
    }

    let svc = ReviewService::new();
    let err = svc
        .create_review(db, user.id, game.id, draft(5))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::StorageConflict);
    assert_eq!(err.status().as_u16(), 409);
    assert!(err.is_storage_conflict());

    unlock_games(db).await;
    assert!(svc
        .list_for_user(db, user.id)
        .await
        .unwrap()
        .is_empty());
    let audit = ActivityService::new()
        .list_for_game(db, game.id, None, None)
        .await
        .unwrap();
    assert!(audit.is_empty(), "audit entries survived: {audit:?}");
    assert_eq!(aggregate(db, game.id).await, (0.0, 0));

    // the same call goes through once the contention is gone
    svc.create_review(db, user.id, game.id, draft(5)).await.unwrap();
    assert_eq!(aggregate(db, game.id).await, (5.0, 1));
}

#[tokio::test]
async fn update_gives_up_and_keeps_previous_rating() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = ReviewService::new();
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();
    let review = svc.create_review(db, user.id, game.id, draft(4)).await.unwrap();
    if !lock_games(db).await {
        return;
    }

    let err = svc
        .update_review(db, review.id, user.id, draft(1))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::StorageConflict);

    unlock_games(db).await;
    assert_eq!(svc.get_review(db, review.id).await.unwrap().review.rating, 4);
    assert_eq!(aggregate(db, game.id).await, (4.0, 1));
}

#[tokio::test]
async fn delete_gives_up_and_keeps_review() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = ReviewService::new();
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();
    let review = svc.create_review(db, user.id, game.id, draft(2)).await.unwrap();
    if !lock_games(db).await {
        return;
    }

    let err = svc
        .delete_review(db, review.id, user.id, Role::User)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::StorageConflict);

    unlock_games(db).await;
    assert!(svc.get_review(db, review.id).await.is_ok());
    assert_eq!(aggregate(db, game.id).await, (2.0, 1));
}
