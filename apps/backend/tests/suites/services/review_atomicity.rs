//! A failure anywhere inside the review unit leaves no trace: no review,
//! no audit entry, aggregate untouched. Failures are forced with SQLite
//! triggers, so these tests only run on the SQLite profile.

use gameshelf_backend::entities::users::Role;
use gameshelf_backend::repos::reviews::ReviewSort;
use gameshelf_backend::services::activities::ActivityService;
use gameshelf_backend::services::reviews::ReviewService;
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection};

use crate::support::factory::{aggregate, create_game, create_user, draft};
use crate::support::test_state::test_state;

const FAIL_AUDIT_INSERT: &str = "CREATE TRIGGER fail_audit BEFORE INSERT ON activity_logs \
     BEGIN SELECT RAISE(ABORT, 'forced audit failure'); END;";
const FAIL_GAME_UPDATE: &str = "CREATE TRIGGER fail_game_update BEFORE UPDATE ON games \
     BEGIN SELECT RAISE(ABORT, 'forced aggregate failure'); END;";

fn is_sqlite(db: &DatabaseConnection) -> bool {
    db.get_database_backend() == DatabaseBackend::Sqlite
}

async fn install(db: &DatabaseConnection, sql: &str) {
    db.execute_unprepared(sql).await.expect("trigger should install");
}

async fn drop_trigger(db: &DatabaseConnection, name: &str) {
    db.execute_unprepared(&format!("DROP TRIGGER {name};"))
        .await
        .expect("trigger should drop");
}

async fn review_count(db: &DatabaseConnection, game_id: i64) -> usize {
    ReviewService::new()
        .list_for_game(db, game_id, ReviewSort::Newest)
        .await
        .unwrap()
        .len()
}

#[tokio::test]
async fn failed_audit_insert_discards_new_review() {
    let state = test_state().await;
    let db = state.db().expect("db");
    if !is_sqlite(db) {
        return;
    }
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();

    install(db, FAIL_AUDIT_INSERT).await;
    let err = ReviewService::new()
        .create_review(db, user.id, game.id, draft(5))
        .await
        .unwrap_err();

    assert_eq!(err.status().as_u16(), 500);
    assert_eq!(review_count(db, game.id).await, 0);
    assert_eq!(aggregate(db, game.id).await, (0.0, 0));
}

#[tokio::test]
async fn failed_aggregate_write_discards_new_review_and_audit() {
    let state = test_state().await;
    let db = state.db().expect("db");
    if !is_sqlite(db) {
        return;
    }
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();

    install(db, FAIL_GAME_UPDATE).await;
    let result = ReviewService::new()
        .create_review(db, user.id, game.id, draft(4))
        .await;
    assert!(result.is_err());

    assert_eq!(review_count(db, game.id).await, 0);
    let audit = ActivityService::new()
        .list_for_game(db, game.id, None, None)
        .await
        .unwrap();
    assert!(audit.is_empty(), "audit entry survived: {audit:?}");
    assert_eq!(aggregate(db, game.id).await, (0.0, 0));
}

#[tokio::test]
async fn failed_update_keeps_previous_rating() {
    let state = test_state().await;
    let db = state.db().expect("db");
    if !is_sqlite(db) {
        return;
    }
    let svc = ReviewService::new();
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();
    let review = svc.create_review(db, user.id, game.id, draft(5)).await.unwrap();

    install(db, FAIL_GAME_UPDATE).await;
    assert!(svc.update_review(db, review.id, user.id, draft(1)).await.is_err());
    drop_trigger(db, "fail_game_update").await;

    assert_eq!(svc.get_review(db, review.id).await.unwrap().review.rating, 5);
    assert_eq!(aggregate(db, game.id).await, (5.0, 1));
}

#[tokio::test]
async fn failed_delete_keeps_review() {
    let state = test_state().await;
    let db = state.db().expect("db");
    if !is_sqlite(db) {
        return;
    }
    let svc = ReviewService::new();
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();
    let review = svc.create_review(db, user.id, game.id, draft(3)).await.unwrap();

    install(db, FAIL_AUDIT_INSERT).await;
    assert!(svc
        .delete_review(db, review.id, user.id, Role::User)
        .await
        .is_err());

    assert!(svc.get_review(db, review.id).await.is_ok());
    assert_eq!(aggregate(db, game.id).await, (3.0, 1));
}
