use gameshelf_backend::entities::activity_logs::ActivityAction;
use gameshelf_backend::errors::ErrorCode;
use gameshelf_backend::services::activities::ActivityService;
use gameshelf_backend::services::game_lists::GameListService;
use gameshelf_backend::services::reviews::ReviewService;
use serde_json::json;

use crate::support::factory::{aggregate, create_game, create_user, draft};
use crate::support::test_state::test_state;

#[tokio::test]
async fn review_mutations_write_audit_entries() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();

    let review = ReviewService::new()
        .create_review(db, user.id, game.id, draft(5))
        .await
        .unwrap();

    let entries = ActivityService::new()
        .list_for_game(db, game.id, Some("review_submitted"), None)
        .await
        .unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].entry.user_id, user.id);
    assert_eq!(entries[0].entry.meta, json!({ "rating": 5, "review_id": review.id }));
    assert_eq!(entries[0].user.username, user.username);
    assert_eq!(entries[0].user.country, user.country);
    assert_eq!(entries[0].game.title, game.title);
    assert_eq!(entries[0].game.platform, game.platform);
}

#[tokio::test]
async fn stats_break_down_by_count() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let lists = GameListService::new();
    let user = create_user(db).await.unwrap();

    let a = create_game(db).await.unwrap();
    let b = create_game(db).await.unwrap();
    let c = create_game(db).await.unwrap();
    for game in [&a, &b, &c] {
        lists.add_to_wishlist(db, user.id, game.id).await.unwrap();
    }
    lists.mark_as_played(db, user.id, a.id, None).await.unwrap();

    let stats = ActivityService::new().stats(db, user.id).await.unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.breakdown[0].action, ActivityAction::AddedToWishlist);
    assert_eq!(stats.breakdown[0].count, 3);
    assert_eq!(stats.breakdown[1].action, ActivityAction::MarkedAsPlayed);
    assert_eq!(stats.breakdown[1].count, 1);

    let recent = stats.most_recent.expect("most recent entry");
    assert_eq!(recent.entry.action, ActivityAction::MarkedAsPlayed);
    assert_eq!(recent.game.id, a.id);
    assert_eq!(recent.game.title, a.title);
}

#[tokio::test]
async fn stats_for_a_quiet_user_are_empty() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let user = create_user(db).await.unwrap();

    let stats = ActivityService::new().stats(db, user.id).await.unwrap();
    assert_eq!(stats.total, 0);
    assert!(stats.breakdown.is_empty());
    assert!(stats.most_recent.is_none());
}

#[tokio::test]
async fn limit_and_action_filters_apply() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let lists = GameListService::new();
    let user = create_user(db).await.unwrap();
    for _ in 0..3 {
        let game = create_game(db).await.unwrap();
        lists.add_to_wishlist(db, user.id, game.id).await.unwrap();
    }

    let svc = ActivityService::new();
    assert_eq!(
        svc.list_for_user(db, user.id, None, Some(2)).await.unwrap().len(),
        2
    );
    assert!(svc
        .list_for_user(db, user.id, Some("marked_as_played"), None)
        .await
        .unwrap()
        .is_empty());

    let err = svc
        .list_for_user(db, user.id, Some("teleported"), None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);
}

#[tokio::test]
async fn deleting_an_entry_leaves_aggregates_alone() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();
    ReviewService::new()
        .create_review(db, user.id, game.id, draft(4))
        .await
        .unwrap();

    let svc = ActivityService::new();
    let listed = svc.list_all(db, None, None).await.unwrap().remove(0);
    svc.delete(db, listed.entry.id).await.unwrap();

    assert!(svc.list_all(db, None, None).await.unwrap().is_empty());
    assert_eq!(aggregate(db, game.id).await, (4.0, 1));

    let err = svc.delete(db, listed.entry.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ActivityNotFound);
}
