use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::create_product::ProductData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::product::models::Price;
use crate::domain::product::models::Sku;
use crate::domain::product::models::UpdateProductCommand;
use crate::inbound::http::router::AppState;
use crate::product::errors::ProductError;

pub async fn update_product(
    State(state): State<AppState>,
    Path(sku): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    let sku = Sku::new(sku).map_err(ProductError::from)?;

    state
        .product_service
        .update_product(&sku, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::OK, product.into()))
}

/// Replacement fields; the SKU comes from the path.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateProductRequest {
    name: String,
    description: String,
    price: f64,
    #[serde(default)]
    image_url: Option<String>,
}

impl UpdateProductRequest {
    fn try_into_command(self) -> Result<UpdateProductCommand, ProductError> {
        Ok(UpdateProductCommand {
            name: self.name,
            description: self.description,
            price: Price::new(self.price)?,
            image_url: self.image_url,
        })
    }
}
