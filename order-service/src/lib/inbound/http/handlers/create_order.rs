use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::order::models::CreateOrderCommand;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderItem;
use crate::domain::order::models::OrderStatus;
use crate::domain::order::models::Quantity;
use crate::domain::product::models::Price;
use crate::domain::product::models::Sku;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::order::errors::OrderError;

/// Place an order owned by the caller.
pub async fn create_order(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<ApiSuccess<OrderData>, ApiError> {
    state
        .order_service
        .create_order(body.try_into_command()?, caller.user.username)
        .await
        .map_err(ApiError::from)
        .map(|ref order| ApiSuccess::new(StatusCode::CREATED, order.into()))
}

/// Order placement body. Any client-supplied total or owner is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateOrderRequest {
    products: Vec<OrderItemData>,
    #[serde(default)]
    status: Option<String>,
}

impl CreateOrderRequest {
    fn try_into_command(self) -> Result<CreateOrderCommand, OrderError> {
        let items = self
            .products
            .into_iter()
            .map(|item| -> Result<OrderItem, OrderError> {
                Ok(OrderItem {
                    sku: Sku::new(item.sku)?,
                    price: Price::new(item.price)?,
                    quantity: Quantity::new(item.quantity)?,
                })
            })
            .collect::<Result<Vec<_>, OrderError>>()?;

        let status = match self.status {
            Some(status) => status.parse()?,
            None => OrderStatus::default(),
        };

        CreateOrderCommand::new(items, status)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemData {
    pub sku: String,
    pub price: f64,
    pub quantity: u32,
}

impl From<&OrderItem> for OrderItemData {
    fn from(item: &OrderItem) -> Self {
        Self {
            sku: item.sku.to_string(),
            price: item.price.value(),
            quantity: item.quantity.value(),
        }
    }
}

/// Wire form of an order, shared by every order endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderData {
    pub id: String,
    pub products: Vec<OrderItemData>,
    pub status: String,
    pub total: f64,
    pub user: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderData {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            products: order.items.iter().map(OrderItemData::from).collect(),
            status: order.status.to_string(),
            total: order.total,
            user: order.user.to_string(),
            created_at: order.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(sku: &str, price: f64, quantity: u32) -> OrderItemData {
        OrderItemData {
            sku: sku.to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_request_defaults_to_pending() {
        let request = CreateOrderRequest {
            products: vec![item("SP001", 2.0, 3)],
            status: None,
        };

        let command = request.try_into_command().unwrap();
        assert_eq!(command.status, OrderStatus::Pending);
        assert_eq!(command.items.len(), 1);
    }

    #[test]
    fn test_request_rejects_bad_items() {
        let zero = CreateOrderRequest {
            products: vec![item("SP001", 2.0, 0)],
            status: None,
        };
        assert!(matches!(
            zero.try_into_command(),
            Err(OrderError::InvalidQuantity(_))
        ));

        let empty = CreateOrderRequest {
            products: vec![],
            status: None,
        };
        assert!(matches!(
            empty.try_into_command(),
            Err(OrderError::EmptyOrder)
        ));

        let unknown_status = CreateOrderRequest {
            products: vec![item("SP001", 2.0, 1)],
            status: Some("shipped".to_string()),
        };
        assert!(matches!(
            unknown_status.try_into_command(),
            Err(OrderError::InvalidStatus(_))
        ));
    }
}
