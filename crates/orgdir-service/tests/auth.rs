//! API key authentication integration tests.

mod common;

use axum::http::StatusCode;
use common::{TestHarness, API_KEY, API_KEY_HEADER};

#[tokio::test]
async fn missing_key_is_forbidden() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/organizations/by-building/")
        .add_query_param("building_id", 1)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "forbidden");
}

#[tokio::test]
async fn wrong_key_is_forbidden() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/organizations/1")
        .add_header(API_KEY_HEADER, "not-the-key")
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn key_check_runs_before_validation() {
    let harness = TestHarness::new();

    // Invalid parameters would be a 400; the missing key wins.
    let response = harness
        .server
        .get("/organizations/by-building/")
        .add_query_param("building_id", -1)
        .add_query_param("limit", 500)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn header_name_is_case_insensitive() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .get("/organizations/1")
        .add_header("X-API-KEY", API_KEY)
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn unconfigured_key_rejects_everything() {
    let harness = TestHarness::without_api_key();

    let response = harness.get("/organizations/1").await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn health_needs_no_key() {
    let harness = TestHarness::without_api_key();

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
}
