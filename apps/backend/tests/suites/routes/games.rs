use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use super::{admin_with_token, seeded_state, user_with_token};
use crate::common::{assert_problem, read_envelope};
use crate::support::create_test_app;
use crate::support::factory::create_game_with;

fn new_game_body(title: &str) -> Value {
    json!({
        "title": title,
        "platform": "PS5",
        "genres": ["Action", "Adventure"],
        "release_date": "2023-10-20",
        "publisher": "Insomniac"
    })
}

#[actix_web::test]
async fn admin_creates_updates_and_deletes_a_game() {
    let (state, db) = seeded_state().await;
    let (_admin, bearer) = admin_with_token(&state, &db).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(new_game_body("Spider-Man 2"))
        .to_request();
    let body = read_envelope(test::call_service(&app, req).await, StatusCode::CREATED).await;
    let game = &body["data"];
    assert_eq!(game["platform"], "PS5");
    assert_eq!(game["release_date"], "2023-10-20");
    assert_eq!(game["avg_rating"], 0.0);
    assert_eq!(game["total_reviews"], 0);
    let id = game["id"].as_i64().expect("id");

    let req = test::TestRequest::put()
        .uri(&format!("/api/games/{id}"))
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({ "publisher": "Sony Interactive" }))
        .to_request();
    let body = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["data"]["publisher"], "Sony Interactive");
    assert_eq!(body["data"]["title"], "Spider-Man 2");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/games/{id}"))
        .insert_header(("Authorization", bearer))
        .to_request();
    let body = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["data"], json!({}));

    let req = test::TestRequest::get()
        .uri(&format!("/api/games/{id}"))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::NOT_FOUND,
        "GAME_NOT_FOUND",
    )
    .await;
}

#[actix_web::test]
async fn duplicate_game_is_400() {
    let (state, db) = seeded_state().await;
    let (_admin, bearer) = admin_with_token(&state, &db).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    for expected in [StatusCode::CREATED, StatusCode::BAD_REQUEST] {
        let req = test::TestRequest::post()
            .uri("/api/games")
            .insert_header(("Authorization", bearer.clone()))
            .set_json(new_game_body("Gran Turismo 7"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        if expected == StatusCode::CREATED {
            read_envelope(resp, expected).await;
        } else {
            assert_problem(resp, expected, "DUPLICATE_GAME").await;
        }
    }
}

#[actix_web::test]
async fn regular_users_cannot_write_games() {
    let (state, db) = seeded_state().await;
    let (_user, bearer) = user_with_token(&state, &db).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .insert_header(("Authorization", bearer))
        .set_json(new_game_body("Not Allowed"))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::FORBIDDEN,
        "INSUFFICIENT_ROLE",
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/games")
        .set_json(new_game_body("Anonymous"))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED_MISSING_BEARER",
    )
    .await;
}

#[actix_web::test]
async fn public_listing_filters_and_counts() {
    let (state, db) = seeded_state().await;
    create_game_with(&db, "PS4", &["RPG"]).await.unwrap();
    create_game_with(&db, "PS5", &["RPG"]).await.unwrap();
    create_game_with(&db, "PS5", &["Racing"]).await.unwrap();
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/games?platform=PS5&genre=rpg")
        .to_request();
    let body = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["genres"], json!(["RPG"]));

    let req = test::TestRequest::get()
        .uri("/api/games/platform/PS4")
        .to_request();
    let body = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["count"], 1);

    let req = test::TestRequest::get()
        .uri("/api/games/platform/Switch")
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "INVALID_PLATFORM",
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/games/top-rated?limit=2")
        .to_request();
    let body = read_envelope(test::call_service(&app, req).await, StatusCode::OK).await;
    assert_eq!(body["count"], 2);
}

#[actix_web::test]
async fn search_needs_a_query() {
    let (state, _db) = seeded_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/games/search").to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
    )
    .await;
}
