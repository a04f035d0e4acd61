use gameshelf_backend::entities::activity_logs::ActivityAction;
use gameshelf_backend::errors::ErrorCode;
use gameshelf_backend::services::activities::ActivityService;
use gameshelf_backend::services::game_lists::GameListService;
use serde_json::json;

use crate::support::factory::{create_game, create_user};
use crate::support::test_state::test_state;

#[tokio::test]
async fn wishlist_then_played_moves_the_game() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = GameListService::new();
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();

    let lists = svc.add_to_wishlist(db, user.id, game.id).await.unwrap();
    assert_eq!(lists.wishlist.len(), 1);
    assert!(lists.played.is_empty());

    let lists = svc
        .mark_as_played(db, user.id, game.id, Some(42.5))
        .await
        .unwrap();
    assert!(lists.wishlist.is_empty());
    assert_eq!(lists.played.len(), 1);
    assert_eq!(lists.played[0].game.id, game.id);
}

#[tokio::test]
async fn game_is_never_in_both_collections() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = GameListService::new();
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();

    svc.mark_as_played(db, user.id, game.id, None).await.unwrap();

    let err = svc.add_to_wishlist(db, user.id, game.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyInList);

    let err = svc
        .mark_as_played(db, user.id, game.id, None)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyInList);

    let lists = svc.get(db, user.id).await.unwrap();
    assert!(lists.wishlist.is_empty());
    assert_eq!(lists.played.len(), 1);
}

#[tokio::test]
async fn duplicate_wishlist_add_is_rejected() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = GameListService::new();
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();

    svc.add_to_wishlist(db, user.id, game.id).await.unwrap();
    let err = svc.add_to_wishlist(db, user.id, game.id).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::AlreadyInList);
    assert_eq!(err.status().as_u16(), 400);
}

#[tokio::test]
async fn unknown_game_and_missing_entries_are_not_found() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = GameListService::new();
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();

    let err = svc.add_to_wishlist(db, user.id, 31_337).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotFound);

    let err = svc
        .remove_from_wishlist(db, user.id, game.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ListEntryNotFound);

    let err = svc
        .remove_from_played(db, user.id, game.id)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ListEntryNotFound);
}

#[tokio::test]
async fn negative_completion_hours_are_rejected() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();

    let err = GameListService::new()
        .mark_as_played(db, user.id, game.id, Some(-1.0))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);
}

#[tokio::test]
async fn list_mutations_are_audited() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = GameListService::new();
    let game = create_game(db).await.unwrap();
    let other = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();

    svc.add_to_wishlist(db, user.id, game.id).await.unwrap();
    svc.remove_from_wishlist(db, user.id, game.id).await.unwrap();
    svc.mark_as_played(db, user.id, other.id, Some(12.0))
        .await
        .unwrap();
    svc.remove_from_played(db, user.id, other.id).await.unwrap();

    let mut entries = ActivityService::new()
        .list_for_user(db, user.id, None, None)
        .await
        .unwrap();
    // newest first; flip to chronological
    entries.reverse();

    let actions: Vec<ActivityAction> = entries.iter().map(|e| e.entry.action).collect();
    assert_eq!(
        actions,
        vec![
            ActivityAction::AddedToWishlist,
            ActivityAction::RemovedFromWishlist,
            ActivityAction::MarkedAsPlayed,
        ]
    );
    assert_eq!(entries[0].entry.meta, json!({ "source": "web" }));
    assert_eq!(entries[1].entry.meta, json!({}));
    assert_eq!(entries[2].entry.meta, json!({ "completion_hours": 12.0 }));
    assert_eq!(entries[2].entry.game_id, other.id);
}
