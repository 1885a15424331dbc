//! Application startup and lifecycle management.
//!
//! Builds the model client once, wires it into the router and serves HTTP
//! until a shutdown signal arrives.

use crate::config::RelayConfig;
use crate::handlers::{
    generate_menu, health_check, list_restaurants, metrics, not_found, process_order,
};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::{Relay, TextProvider};
use axum::{
    body::Body,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
}

impl AppState {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self {
            relay: Relay::new(provider),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/restaurants", get(list_restaurants))
        .route("/menu", post(generate_menu))
        .route("/process-order", post(process_order))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .route("/metrics", get(metrics))
        .fallback(not_found)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the Gemini provider from `config`.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let gemini_config = GeminiConfig {
            api_key: config.google.api_key.clone(),
            model: config.models.text_model.clone(),
            api_base: config.google.api_base.clone(),
            timeout: Duration::from_secs(config.google.timeout_secs),
        };
        let provider = GeminiTextProvider::new(gemini_config).map_err(|e| {
            tracing::error!("Failed to initialize Gemini provider: {}", e);
            AppError::ConfigError(anyhow::Error::new(e))
        })?;

        tracing::info!(
            model = %provider.model(),
            "Initialized Gemini text provider"
        );

        Self::build_with_provider(config, Arc::new(provider)).await
    }

    /// Build the application around an already constructed provider.
    pub async fn build_with_provider(
        config: RelayConfig,
        provider: Arc<dyn TextProvider>,
    ) -> Result<Self, AppError> {
        // port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state: AppState::new(provider),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let port = self.port;
        tracing::info!("服务器运行在 http://localhost:{}", port);
        for (method, path, what) in [
            ("GET ", "/api/restaurants", "获取餐厅列表"),
            ("POST", "/api/menu", "获取餐厅菜单"),
            ("POST", "/api/process-order", "处理订单"),
            ("GET ", "/api/health", "健康检查"),
        ] {
            tracing::info!("{} http://localhost:{}{} - {}", method, port, path, what);
        }

        axum::serve(self.listener, build_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
