#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::{
    assert_problem_details_from_service_response, ProblemDetailsLike,
};
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Problem Details checks plus the `x-request-id` header, which carries the
/// same trace id as the body.
pub async fn assert_problem(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
) -> ProblemDetailsLike {
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("x-request-id header should be present");

    let problem =
        assert_problem_details_from_service_response(resp, expected_code, expected_status).await;
    assert_eq!(problem.trace_id, request_id);
    problem
}

/// Read a success envelope, asserting status and `success: true`.
pub async fn read_envelope(resp: ServiceResponse<BoxBody>, expected_status: StatusCode) -> Value {
    assert_eq!(resp.status(), expected_status, "unexpected HTTP status");
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], Value::Bool(true), "envelope: {body}");
    body
}
