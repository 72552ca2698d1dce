use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::create_product::ProductData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::product::models::Sku;
use crate::inbound::http::router::AppState;
use crate::product::errors::ProductError;

pub async fn get_product(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let sku = Sku::new(sku).map_err(ProductError::from)?;

    state
        .product_service
        .get_product(&sku)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}
