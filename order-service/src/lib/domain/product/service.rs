use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::Sku;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;

/// Domain service implementation for the product catalogue.
pub struct ProductService<PR>
where
    PR: ProductRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProductService<PR>
where
    PR: ProductRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<PR> ProductServicePort for ProductService<PR>
where
    PR: ProductRepository,
{
    async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.repository.list_all().await
    }

    async fn get_product(&self, sku: &Sku) -> Result<Product, ProductError> {
        self.repository
            .find_by_sku(sku)
            .await?
            .ok_or(ProductError::NotFound(sku.to_string()))
    }

    async fn create_product(
        &self,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError> {
        if self.repository.find_by_sku(&command.sku).await?.is_some() {
            return Err(ProductError::AlreadyExists(command.sku.to_string()));
        }

        let product = self.repository.create(Product::new(command)).await?;
        tracing::info!(sku = %product.sku, "Created product");

        Ok(product)
    }

    async fn update_product(
        &self,
        sku: &Sku,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut product = self.get_product(sku).await?;
        product.apply(command);

        self.repository.update(product).await
    }

    async fn delete_product(&self, sku: &Sku) -> Result<Product, ProductError> {
        let product = self.repository.delete(sku).await?;
        tracing::info!(sku = %product.sku, "Deleted product");

        Ok(product)
    }
}
