use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::Sku;
use crate::inbound::http::router::AppState;
use crate::product::errors::ProductError;

pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<ApiSuccess<ProductData>, ApiError> {
    state
        .product_service
        .create_product(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref product| ApiSuccess::new(StatusCode::CREATED, product.into()))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateProductRequest {
    sku: String,
    name: String,
    description: String,
    price: f64,
    #[serde(default)]
    image_url: Option<String>,
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ProductError> {
        Ok(CreateProductCommand {
            sku: Sku::new(self.sku)?,
            name: self.name,
            description: self.description,
            price: Price::new(self.price)?,
            image_url: self.image_url,
        })
    }
}

/// Wire form of a product, shared by every product endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductData {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            sku: product.sku.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.value(),
            image_url: product.image_url.clone(),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
