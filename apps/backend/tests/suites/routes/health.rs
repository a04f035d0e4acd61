use actix_web::http::StatusCode;
use actix_web::test;
use gameshelf_backend::state::app_state::AppState;
use gameshelf_backend::state::security_config::SecurityConfig;
use serde_json::Value;

use crate::support::create_test_app;
use crate::support::test_state::test_state;

#[actix_web::test]
async fn health_reports_database_and_migrations() {
    let app = create_test_app(test_state().await)
        .with_prod_routes()
        .build()
        .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_ne!(body["migrations"], "unknown");
}

#[actix_web::test]
async fn health_without_database_is_still_alive() {
    let state = AppState::new_without_db(SecurityConfig::default());
    let app = create_test_app(state).with_prod_routes().build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["db"], "error");
    assert!(body["db_error"].is_string());
}
