use gameshelf_backend::entities::users::Role;
use gameshelf_backend::errors::ErrorCode;
use gameshelf_backend::repos::reviews::ReviewSort;
use gameshelf_backend::services::reviews::ReviewService;

use crate::support::factory::{aggregate, create_game, create_user, draft};
use crate::support::test_state::test_state;

#[tokio::test]
async fn create_update_delete_walkthrough() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = ReviewService::new();

    let game = create_game(db).await.unwrap();
    let alice = create_user(db).await.unwrap();
    let bob = create_user(db).await.unwrap();
    assert_eq!(aggregate(db, game.id).await, (0.0, 0));

    let first = svc.create_review(db, alice.id, game.id, draft(5)).await.unwrap();
    assert_eq!(aggregate(db, game.id).await, (5.0, 1));

    let second = svc.create_review(db, bob.id, game.id, draft(3)).await.unwrap();
    assert_eq!(aggregate(db, game.id).await, (4.0, 2));

    svc.update_review(db, first.id, alice.id, draft(1)).await.unwrap();
    assert_eq!(aggregate(db, game.id).await, (2.0, 2));

    svc.delete_review(db, first.id, alice.id, Role::User).await.unwrap();
    svc.delete_review(db, second.id, bob.id, Role::User).await.unwrap();
    assert_eq!(aggregate(db, game.id).await, (0.0, 0));
}

#[tokio::test]
async fn averages_round_half_up_to_one_decimal() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = ReviewService::new();
    let game = create_game(db).await.unwrap();

    for rating in [4, 4, 5] {
        let user = create_user(db).await.unwrap();
        svc.create_review(db, user.id, game.id, draft(rating)).await.unwrap();
    }
    assert_eq!(aggregate(db, game.id).await, (4.3, 3));

    let other = create_game(db).await.unwrap();
    for rating in [4, 5] {
        let user = create_user(db).await.unwrap();
        svc.create_review(db, user.id, other.id, draft(rating)).await.unwrap();
    }
    assert_eq!(aggregate(db, other.id).await, (4.5, 2));
}

#[tokio::test]
async fn second_review_for_same_game_is_rejected() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = ReviewService::new();
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();

    svc.create_review(db, user.id, game.id, draft(4)).await.unwrap();
    let err = svc
        .create_review(db, user.id, game.id, draft(2))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::DuplicateReview);
    assert_eq!(err.status().as_u16(), 400);
    assert_eq!(aggregate(db, game.id).await, (4.0, 1));
}

#[tokio::test]
async fn reviews_of_other_games_do_not_leak_into_aggregate() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = ReviewService::new();
    let game = create_game(db).await.unwrap();
    let other = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();

    svc.create_review(db, user.id, game.id, draft(2)).await.unwrap();
    svc.create_review(db, user.id, other.id, draft(5)).await.unwrap();

    assert_eq!(aggregate(db, game.id).await, (2.0, 1));
    assert_eq!(aggregate(db, other.id).await, (5.0, 1));
}

#[tokio::test]
async fn review_for_missing_game_is_not_found() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let user = create_user(db).await.unwrap();

    let err = ReviewService::new()
        .create_review(db, user.id, 999_999, draft(3))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotFound);
}

#[tokio::test]
async fn game_reviews_sort_by_rating() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = ReviewService::new();
    let game = create_game(db).await.unwrap();

    for rating in [3, 5, 1] {
        let user = create_user(db).await.unwrap();
        svc.create_review(db, user.id, game.id, draft(rating)).await.unwrap();
    }

    let high: Vec<i16> = svc
        .list_for_game(db, game.id, ReviewSort::RatingHigh)
        .await
        .unwrap()
        .iter()
        .map(|r| r.review.rating)
        .collect();
    assert_eq!(high, vec![5, 3, 1]);

    let low: Vec<i16> = svc
        .list_for_game(db, game.id, ReviewSort::RatingLow)
        .await
        .unwrap()
        .iter()
        .map(|r| r.review.rating)
        .collect();
    assert_eq!(low, vec![1, 3, 5]);

    let err = svc
        .list_for_game(db, 424_242, ReviewSort::Newest)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::GameNotFound);
}

#[tokio::test]
async fn reads_carry_author_and_game() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let svc = ReviewService::new();
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();
    let review = svc.create_review(db, user.id, game.id, draft(4)).await.unwrap();

    let details = svc.get_review(db, review.id).await.unwrap();
    assert_eq!(details.review, review);
    assert_eq!(details.user.username, user.username);
    assert_eq!(details.user.country, user.country);
    assert_eq!(details.game.title, game.title);
    assert_eq!(details.game.platform, game.platform);
    // the game summary reflects the aggregate written by the same unit
    assert_eq!(details.game.avg_rating, 4.0);

    let mine = svc.list_for_user(db, user.id).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].game.id, game.id);

    let for_game = svc
        .list_for_game(db, game.id, ReviewSort::Newest)
        .await
        .unwrap();
    assert_eq!(for_game[0].user.id, user.id);
}
