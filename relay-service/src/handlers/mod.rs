//! HTTP handlers for the relay service.
//!
//! Model-backed routes never fail on upstream errors: they log, count the
//! fallback and answer 200 with static data. Only missing client input is
//! reported as 400.

pub mod health;
pub mod menu;
pub mod metrics;
pub mod orders;
pub mod restaurants;

pub use health::health_check;
pub use menu::generate_menu;
pub use metrics::metrics;
pub use orders::process_order;
pub use restaurants::list_restaurants;

use axum::http::Uri;
use service_core::error::AppError;

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
