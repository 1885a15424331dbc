use axum::{extract::State, Json};

use crate::models::Restaurant;
use crate::services::fallback;
use crate::services::metrics::record_fallback;
use crate::services::relay::ROUTE_RESTAURANTS;
use crate::startup::AppState;

#[tracing::instrument(skip(state))]
pub async fn list_restaurants(State(state): State<AppState>) -> Json<Vec<Restaurant>> {
    tracing::info!(provider = state.relay.provider_name(), "Generating restaurant list");

    match state.relay.list_restaurants().await {
        Ok(restaurants) => Json(restaurants),
        Err(e) => {
            tracing::warn!(
                error.kind = e.kind(),
                error = %e,
                "Restaurant generation failed, serving fallback list"
            );
            record_fallback(ROUTE_RESTAURANTS, e.kind());
            Json(fallback::restaurants())
        }
    }
}
