use axum::{response::IntoResponse, Json};
use chrono::{SecondsFormat, Utc};
use serde_json::json;

/// Liveness only; does not touch the model provider.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
