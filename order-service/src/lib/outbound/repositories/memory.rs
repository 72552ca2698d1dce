//! Process-local repositories backing the database-less run mode and tests.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::order::errors::OrderError;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::order::ports::OrderRepository;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Product;
use crate::domain::product::models::Sku;
use crate::domain::product::ports::ProductRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Username, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }

        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

/// Products keyed by SKU, listed in SKU order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<Sku, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.sku) {
            return Err(ProductError::AlreadyExists(product.sku.to_string()));
        }

        products.insert(product.sku.clone(), product.clone());
        Ok(product)
    }

    async fn find_by_sku(&self, sku: &Sku) -> Result<Option<Product>, ProductError> {
        Ok(self.products.read().await.get(sku).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        match self.products.write().await.get_mut(&product.sku) {
            Some(stored) => {
                *stored = product.clone();
                Ok(product)
            }
            None => Err(ProductError::NotFound(product.sku.to_string())),
        }
    }

    async fn delete(&self, sku: &Sku) -> Result<Product, ProductError> {
        self.products
            .write()
            .await
            .remove(sku)
            .ok_or(ProductError::NotFound(sku.to_string()))
    }
}

/// Orders kept in placement order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, OrderError> {
        self.orders.write().await.push(order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .find(|order| order.id == *id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.read().await.clone())
    }

    async fn find_by_user(&self, username: &Username) -> Result<Vec<Order>, OrderError> {
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .filter(|order| order.user == *username)
            .cloned()
            .collect())
    }
}
