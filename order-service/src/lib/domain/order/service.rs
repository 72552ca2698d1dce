use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::order::errors::OrderError;
use crate::domain::order::models::CreateOrderCommand;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::order::ports::OrderRepository;
use crate::domain::order::ports::OrderServicePort;
use crate::domain::user::models::Username;

/// Domain service implementation for order operations.
pub struct OrderService<OR>
where
    OR: OrderRepository,
{
    repository: Arc<OR>,
}

impl<OR> OrderService<OR>
where
    OR: OrderRepository,
{
    pub fn new(repository: Arc<OR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<OR> OrderServicePort for OrderService<OR>
where
    OR: OrderRepository,
{
    async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.repository.list_all().await
    }

    async fn list_orders_by_user(&self, username: &Username) -> Result<Vec<Order>, OrderError> {
        self.repository.find_by_user(username).await
    }

    async fn get_order(&self, id: &OrderId) -> Result<Order, OrderError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id.to_string()))
    }

    async fn create_order(
        &self,
        command: CreateOrderCommand,
        owner: Username,
    ) -> Result<Order, OrderError> {
        let order = self
            .repository
            .create(Order::place(command, owner))
            .await?;

        tracing::info!(order_id = %order.id, user = %order.user, total = order.total, "Placed order");

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::order::models::OrderItem;
    use crate::domain::order::models::OrderStatus;
    use crate::domain::order::models::Quantity;
    use crate::domain::product::models::Price;
    use crate::domain::product::models::Sku;

    mock! {
        pub TestOrderRepository {}

        #[async_trait]
        impl OrderRepository for TestOrderRepository {
            async fn create(&self, order: Order) -> Result<Order, OrderError>;
            async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError>;
            async fn list_all(&self) -> Result<Vec<Order>, OrderError>;
            async fn find_by_user(&self, username: &Username) -> Result<Vec<Order>, OrderError>;
        }
    }

    fn username(raw: &str) -> Username {
        Username::new(raw.to_string()).unwrap()
    }

    fn command() -> CreateOrderCommand {
        CreateOrderCommand::new(
            vec![
                OrderItem {
                    sku: Sku::new("SP001".to_string()).unwrap(),
                    price: Price::new(2.0).unwrap(),
                    quantity: Quantity::new(3).unwrap(),
                },
                OrderItem {
                    sku: Sku::new("EA001".to_string()).unwrap(),
                    price: Price::new(850.0).unwrap(),
                    quantity: Quantity::new(2).unwrap(),
                },
            ],
            OrderStatus::Pending,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_order_stamps_owner_and_total() {
        let mut repository = MockTestOrderRepository::new();

        repository
            .expect_create()
            .withf(|order| order.user.as_str() == "admin" && order.total == 1706.0)
            .times(1)
            .returning(|order| Ok(order));

        let service = OrderService::new(Arc::new(repository));

        let order = service
            .create_order(command(), username("admin"))
            .await
            .unwrap();
        assert_eq!(order.user.as_str(), "admin");
        assert_eq!(order.total, 1706.0);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_get_order_success() {
        let mut repository = MockTestOrderRepository::new();

        let order = Order::place(command(), username("admin"));
        let order_id = order.id;
        repository
            .expect_find_by_id()
            .withf(move |id| *id == order_id)
            .times(1)
            .returning(move |_| Ok(Some(order.clone())));

        let service = OrderService::new(Arc::new(repository));

        let found = service.get_order(&order_id).await.unwrap();
        assert_eq!(found.id, order_id);
    }

    #[tokio::test]
    async fn test_get_order_not_found() {
        let mut repository = MockTestOrderRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = OrderService::new(Arc::new(repository));

        let order_id = OrderId::new();
        let error = service.get_order(&order_id).await.unwrap_err();
        assert_eq!(
            error.to_string(),
            format!("Order with id {} not found", order_id)
        );
    }

    #[tokio::test]
    async fn test_list_orders_by_user() {
        let mut repository = MockTestOrderRepository::new();

        repository
            .expect_find_by_user()
            .withf(|username| username.as_str() == "user")
            .times(1)
            .returning(|username| Ok(vec![Order::place(command(), username.clone())]));
        repository.expect_list_all().times(0);

        let service = OrderService::new(Arc::new(repository));

        let orders = service
            .list_orders_by_user(&username("user"))
            .await
            .unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].user.as_str(), "user");
    }
}
