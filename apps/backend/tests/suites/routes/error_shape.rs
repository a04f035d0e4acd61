use actix_web::http::StatusCode;
use actix_web::test;
use gameshelf_backend::repos::users::User;
use gameshelf_backend::state::app_state::AppState;
use gameshelf_backend::state::security_config::SecurityConfig;
use time::OffsetDateTime;

use super::{seeded_state, user_with_token};
use crate::common::assert_problem;
use crate::support::auth::bearer_header;
use crate::support::create_test_app;

#[actix_web::test]
async fn non_numeric_path_id_is_400() {
    let (state, _db) = seeded_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/reviews/not-a-number")
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
    )
    .await;
}

#[actix_web::test]
async fn malformed_query_is_400() {
    let (state, _db) = seeded_state().await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/games/top-rated?limit=lots")
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
    )
    .await;
}

#[actix_web::test]
async fn token_for_deleted_user_is_403() {
    let (state, _db) = seeded_state().await;
    let ghost = User {
        id: 987_654,
        username: "ghost".into(),
        email: "ghost@example.test".into(),
        country: "NZ".into(),
        role: gameshelf_backend::entities::users::Role::User,
        created_at: OffsetDateTime::now_utc(),
    };
    let bearer = bearer_header(&ghost, &state.security);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/users/me/gamelist")
        .insert_header(("Authorization", bearer))
        .to_request();
    assert_problem(
        test::call_service(&app, req).await,
        StatusCode::FORBIDDEN,
        "FORBIDDEN_USER_NOT_FOUND",
    )
    .await;
}

#[actix_web::test]
async fn missing_database_is_503() {
    let state = AppState::new_without_db(SecurityConfig::default());
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/games").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.headers().contains_key("retry-after"));
    assert_problem(resp, StatusCode::SERVICE_UNAVAILABLE, "DB_UNAVAILABLE").await;
}

#[actix_web::test]
async fn unauthorized_carries_www_authenticate() {
    let (state, db) = seeded_state().await;
    let (_user, _bearer) = user_with_token(&state, &db).await;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/activities/me")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
    assert_problem(resp, StatusCode::UNAUTHORIZED, "UNAUTHORIZED_MISSING_BEARER").await;
}
