use futures_util::future::join_all;
use gameshelf_backend::services::reviews::ReviewService;

use crate::support::factory::{aggregate, create_game, create_user, draft};
use crate::support::test_state::test_state;

#[tokio::test]
async fn concurrent_creates_leave_a_correct_aggregate() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let game = create_game(db).await.unwrap();

    let ratings = [5, 4, 3, 2, 1, 5, 4, 3];
    let mut users = Vec::new();
    for _ in ratings {
        users.push(create_user(db).await.unwrap());
    }

    let svc = ReviewService::new();
    let results = join_all(
        users
            .iter()
            .zip(ratings)
            .map(|(user, rating)| svc.create_review(db, user.id, game.id, draft(rating))),
    )
    .await;

    let created = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(created, ratings.len(), "results: {results:?}");

    // 27 / 8 = 3.375
    assert_eq!(aggregate(db, game.id).await, (3.4, 8));
}

#[tokio::test]
async fn concurrent_duplicate_creates_keep_one_review() {
    let state = test_state().await;
    let db = state.db().expect("db");
    let game = create_game(db).await.unwrap();
    let user = create_user(db).await.unwrap();

    let svc = ReviewService::new();
    let results = join_all((0..4).map(|_| svc.create_review(db, user.id, game.id, draft(4)))).await;

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(aggregate(db, game.id).await, (4.0, 1));
}
