use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::create_order::OrderData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Orders placed by the caller.
pub async fn list_my_orders(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<OrderData>>, ApiError> {
    let orders = state
        .order_service
        .list_orders_by_user(&caller.user.username)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        orders.iter().map(OrderData::from).collect(),
    ))
}
