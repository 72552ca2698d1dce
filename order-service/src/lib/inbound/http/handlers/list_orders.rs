use axum::extract::State;
use axum::http::StatusCode;

use super::create_order::OrderData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<OrderData>>, ApiError> {
    let orders = state.order_service.list_orders().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        orders.iter().map(OrderData::from).collect(),
    ))
}
