use axum::{extract::rejection::JsonRejection, extract::State, Json};
use service_core::error::AppError;

use crate::models::{OrderConfirmation, OrderRequestBody};
use crate::services::fallback;
use crate::services::metrics::record_fallback;
use crate::services::relay::ROUTE_PROCESS_ORDER;
use crate::startup::AppState;

pub const ORDER_FIELDS_REQUIRED: &str = "订单详情和购物车数据不能为空";

#[tracing::instrument(skip(state, body))]
pub async fn process_order(
    State(state): State<AppState>,
    body: Result<Json<OrderRequestBody>, JsonRejection>,
) -> Result<Json<OrderConfirmation>, AppError> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable order request body");
            OrderRequestBody::default()
        }
    };

    let order = body
        .into_request()
        .ok_or_else(|| AppError::bad_request(ORDER_FIELDS_REQUIRED))?;

    tracing::info!(cart_items = order.cart.len(), "Processing order");

    match state.relay.confirm_order(&order).await {
        Ok(confirmation) => Ok(Json(confirmation)),
        Err(e) => {
            let confirmation = fallback::order_confirmation();
            tracing::warn!(
                error.kind = e.kind(),
                error = %e,
                order_number = %confirmation.order_number,
                "Order confirmation failed, serving fallback confirmation"
            );
            record_fallback(ROUTE_PROCESS_ORDER, e.kind());
            Ok(Json(confirmation))
        }
    }
}
