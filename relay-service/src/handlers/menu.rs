use axum::{extract::rejection::JsonRejection, extract::State, Json};
use service_core::error::AppError;

use crate::models::{MenuItem, MenuRequest};
use crate::services::fallback;
use crate::services::metrics::record_fallback;
use crate::services::relay::ROUTE_MENU;
use crate::startup::AppState;

pub const RESTAURANT_NAME_REQUIRED: &str = "餐厅名称不能为空";

#[tracing::instrument(skip(state, body))]
pub async fn generate_menu(
    State(state): State<AppState>,
    body: Result<Json<MenuRequest>, JsonRejection>,
) -> Result<Json<Vec<MenuItem>>, AppError> {
    // An unreadable body is treated the same as one without the field.
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable menu request body");
            MenuRequest::default()
        }
    };

    let Some(restaurant_name) = request.restaurant_name() else {
        return Err(AppError::bad_request(RESTAURANT_NAME_REQUIRED));
    };

    tracing::info!(restaurant_name = %restaurant_name, "Generating menu");

    match state.relay.generate_menu(restaurant_name).await {
        Ok(menu) => Ok(Json(menu)),
        Err(e) => {
            tracing::warn!(
                restaurant_name = %restaurant_name,
                error.kind = e.kind(),
                error = %e,
                category = fallback::menu_category(restaurant_name),
                "Menu generation failed, serving fallback menu"
            );
            record_fallback(ROUTE_MENU, e.kind());
            Ok(Json(fallback::menu(restaurant_name)))
        }
    }
}
