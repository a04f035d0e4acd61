use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::json;

use super::{seeded_state, user_with_token};
use crate::common::{assert_problem, read_envelope};
use crate::support::create_test_app;
use crate::support::factory::create_game;

#[actix_web::test]
async fn wishlist_and_played_round_trip() {
    let (state, db) = seeded_state().await;
    let game = create_game(&db).await.unwrap();
    let (_user, bearer) = user_with_token(&state, &db).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/users/me/wishlist")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({ "game_id": game.id }))
        .to_request();
    let body = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["data"]["wishlist"][0]["game"]["id"], game.id);

    let req = test::TestRequest::post()
        .uri("/api/users/me/wishlist")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({ "game_id": game.id }))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "ALREADY_IN_LIST",
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/users/me/played")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({ "game_id": game.id, "completion_hours": 30 }))
        .to_request();
    let body = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["data"]["wishlist"], json!([]));
    assert_eq!(body["data"]["played"][0]["game"]["id"], game.id);

    let req = test::TestRequest::get()
        .uri("/api/users/me/played")
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    let body = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["count"], 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/me/played/{}", game.id))
        .insert_header(("Authorization", bearer.clone()))
        .to_request();
    read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/me/wishlist/{}", game.id))
        .insert_header(("Authorization", bearer))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "LIST_ENTRY_NOT_FOUND",
    )
    .await;
}

#[actix_web::test]
async fn unknown_game_is_404_and_anonymous_is_401() {
    let (state, db) = seeded_state().await;
    let (_user, bearer) = user_with_token(&state, &db).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/users/me/wishlist")
        .insert_header(("Authorization", bearer))
        .set_json(json!({ "game_id": 123_456 }))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "GAME_NOT_FOUND",
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/users/me/gamelist")
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED_MISSING_BEARER",
    )
    .await;
}
