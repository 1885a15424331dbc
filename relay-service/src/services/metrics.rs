//! Metrics collection and Prometheus export.
//!
//! Initializes the metrics exporter and provides the /metrics endpoint handler.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// Safe to call more than once; only the first call installs a recorder.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!("Failed to install Prometheus recorder: {}", e),
    }
}

/// Get the current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record one model round-trip. `outcome` is `ok` or a `GenerationError` kind.
pub fn record_generation(route: &'static str, outcome: &'static str, latency: Duration) {
    counter!("relay_generation_total", "route" => route, "outcome" => outcome).increment(1);
    histogram!("relay_model_latency_seconds", "route" => route).record(latency.as_secs_f64());
}

/// Record that a route answered with static data.
pub fn record_fallback(route: &'static str, reason: &'static str) {
    counter!("relay_fallback_total", "route" => route, "reason" => reason).increment(1);
}
