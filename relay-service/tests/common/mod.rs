#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use relay_service::config::RelayConfig;
use relay_service::services::providers::mock::MockTextProvider;
use relay_service::services::ProviderError;
use relay_service::startup::{build_router, AppState, Application};
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::ServiceExt;

/// Config as it would load with only `GEMINI_API_KEY` set, on a random port.
pub fn test_config() -> RelayConfig {
    RelayConfig::from_lookup(CoreConfig { port: 0 }, |key| match key {
        "GEMINI_API_KEY" => Some("test-api-key".to_string()),
        _ => None,
    })
    .expect("Failed to build test config")
}

/// Router backed by `mock`; the mock is returned for call inspection.
pub fn router_with(mock: MockTextProvider) -> (Router, Arc<MockTextProvider>) {
    let mock = Arc::new(mock);
    (build_router(AppState::new(mock.clone())), mock)
}

/// Router whose model dependency always fails.
pub fn failing_router() -> (Router, Arc<MockTextProvider>) {
    router_with(MockTextProvider::failing(ProviderError::NetworkError(
        "connection refused".to_string(),
    )))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_raw(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header(header::CONTENT_TYPE, ct);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Send one request through the router and decode the JSON body.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub mock: Arc<MockTextProvider>,
}

impl TestApp {
    /// Serve the full application on a random port.
    pub async fn spawn(mock: MockTextProvider) -> Self {
        let mock = Arc::new(mock);
        let app = Application::build_with_provider(test_config(), mock.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/api/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            mock,
        }
    }
}
