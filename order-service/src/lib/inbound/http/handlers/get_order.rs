use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::create_order::OrderData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::order::models::OrderId;
use crate::inbound::http::router::AppState;
use crate::order::errors::OrderError;

/// Fetch one order. A malformed id is reported as not found.
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<ApiSuccess<OrderData>, ApiError> {
    let id = OrderId::from_string(&order_id).map_err(|_| OrderError::NotFound(order_id))?;

    state
        .order_service
        .get_order(&id)
        .await
        .map_err(ApiError::from)
        .map(|ref order| ApiSuccess::new(StatusCode::OK, order.into()))
}
