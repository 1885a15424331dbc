mod common;

use axum::http::{header, Request, StatusCode};
use common::{failing_router, get, send, TestApp};
use relay_service::services::providers::mock::MockTextProvider;
use relay_service::services::ProviderError;
use std::time::Duration;

#[tokio::test]
async fn health_check_returns_ok_with_timestamp() {
    let (router, _) = failing_router();

    let (status, body) = send(&router, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let timestamp = body["timestamp"].as_str().expect("timestamp should be a string");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn health_check_never_calls_the_model() {
    let (router, mock) = failing_router();

    for _ in 0..3 {
        let (status, _) = send(&router, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
    }

    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let (router, _) = failing_router();

    let (status, body) = send(&router, get("/api/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("/api/nope"));
}

#[tokio::test]
async fn metrics_endpoint_is_text() {
    let (router, _) = failing_router();

    let response = tower::ServiceExt::oneshot(router, get("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let (router, _) = failing_router();

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/menu")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(router, request).await.unwrap();

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn spawned_server_answers_health_and_echoes_request_id() {
    let app = TestApp::spawn(MockTextProvider::failing(ProviderError::RateLimited)).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/health", app.address))
        .header("x-request-id", "req-42")
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert_eq!(response.headers()["x-request-id"], "req-42");

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn spawned_server_serves_fallback_over_the_wire() {
    let app = TestApp::spawn(MockTextProvider::failing(ProviderError::ApiError(
        "Gemini API error 503".to_string(),
    )))
    .await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/restaurants", app.address))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body.as_array().map(Vec::len), Some(8));
    assert_eq!(app.mock.calls().len(), 1);
}
