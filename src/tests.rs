//! # Tests Module
//!
//! Router-level tests for the primepost web service. Each test builds the same
//! router as the binary and drives it with `tower::ServiceExt::oneshot`.
//!
//! The `/post` tests either fail validation before any network activity or talk
//! to a local `httpmock` server, so no real API is contacted.

use crate::{
    calc::todays_message,
    config::Credentials,
    handlers::{build_router, handle_health, handle_root, status_for_error, AppState},
    twitter::Publisher,
    PublishError,
};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Json,
    Router,
};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn complete_credentials() -> Credentials {
    Credentials::new("key", "secret", "token", "token-secret")
}

/// Creates a test application instance pointed at `base_url`.
fn create_test_app(base_url: &str, credentials: Credentials) -> Router {
    build_router(AppState {
        publisher: Arc::new(Publisher::new(base_url).unwrap()),
        credentials: Arc::new(credentials),
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Tests the root endpoint handler function directly.
#[tokio::test]
async fn test_handle_root() {
    assert_eq!(handle_root().await, "primepost is running");
}

/// Tests the health endpoint handler function directly.
#[tokio::test]
async fn test_handle_health() {
    let Json(json_response): Json<Value> = handle_health().await;

    assert_eq!(json_response["status"], "healthy");
    assert_eq!(json_response["service"], "primepost");
}

/// Integration test for the health endpoint (GET /health).
#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app("http://127.0.0.1:9/2", Credentials::default());

    let request = Request::builder()
        .uri("/health")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json_response = body_json(response).await;
    assert_eq!(json_response["status"], "healthy");
    assert_eq!(json_response["service"], "primepost");
}

/// Integration test for the post endpoint (POST /post) without credentials.
///
/// Validation fails before the publisher contacts the (unreachable) API, and the
/// error names the first missing environment variable.
#[tokio::test]
async fn test_post_endpoint_without_credentials() {
    let app = create_test_app("http://127.0.0.1:9/2", Credentials::default());

    let request = Request::builder()
        .uri("/post")
        .method("POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json_response = body_json(response).await;
    assert_eq!(json_response["status"], "error");
    assert_eq!(json_response["message"], "Failed to post tweet");
    assert_eq!(json_response["error"], "TWITTER_API_KEY is required");
}

/// Integration test for the post endpoint (POST /post) against a mock API.
#[tokio::test]
async fn test_post_endpoint_publishes_todays_message() {
    let server = MockServer::start_async().await;
    let message = todays_message();
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/2/tweets")
                .json_body(json!({ "text": message }));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "data": { "id": "1850000000000000000", "text": message } }));
        })
        .await;

    let app = create_test_app(&server.url("/2"), complete_credentials());
    let request = Request::builder()
        .uri("/post")
        .method("POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    mock.assert_async().await;

    let json_response = body_json(response).await;
    assert_eq!(json_response["status"], "success");
    assert_eq!(json_response["id"], "1850000000000000000");
    assert_eq!(json_response["text"], message);
}

/// Integration test for the post endpoint (POST /post) when the API rate limits.
#[tokio::test]
async fn test_post_endpoint_maps_rate_limit() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/2/tweets");
            then.status(429)
                .header("content-type", "application/json")
                .body(r#"{"title":"Too Many Requests","status":429}"#);
        })
        .await;

    let app = create_test_app(&server.url("/2"), complete_credentials());
    let request = Request::builder()
        .uri("/post")
        .method("POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let json_response = body_json(response).await;
    assert_eq!(json_response["status"], "error");
}

#[test]
fn test_status_for_error() {
    assert_eq!(
        status_for_error(&PublishError::InvalidMessage {
            reason: "empty".to_string()
        }),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        status_for_error(&PublishError::Unauthorized),
        StatusCode::BAD_GATEWAY
    );
    assert_eq!(
        status_for_error(&PublishError::UnexpectedStatus {
            status: 503,
            reason: "Service Unavailable".to_string()
        }),
        StatusCode::BAD_GATEWAY
    );
}
