use async_trait::async_trait;

use crate::domain::order::errors::OrderError;
use crate::domain::order::models::CreateOrderCommand;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::user::models::Username;

/// Port for order operations.
#[async_trait]
pub trait OrderServicePort: Send + Sync + 'static {
    async fn list_orders(&self) -> Result<Vec<Order>, OrderError>;

    /// Orders placed by `username`.
    async fn list_orders_by_user(&self, username: &Username) -> Result<Vec<Order>, OrderError>;

    /// # Errors
    /// * `NotFound` - No order with this ID
    async fn get_order(&self, id: &OrderId) -> Result<Order, OrderError>;

    /// Place an order owned by `owner`.
    async fn create_order(
        &self,
        command: CreateOrderCommand,
        owner: Username,
    ) -> Result<Order, OrderError>;
}

/// Persistence operations for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn create(&self, order: Order) -> Result<Order, OrderError>;

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;

    /// All orders, oldest first.
    async fn list_all(&self) -> Result<Vec<Order>, OrderError>;

    /// Orders owned by `username`, oldest first.
    async fn find_by_user(&self, username: &Username) -> Result<Vec<Order>, OrderError>;
}
