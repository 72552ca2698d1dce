use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::Sku;
use crate::domain::product::models::UpdateProductCommand;

/// Port for product catalogue operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    async fn list_products(&self) -> Result<Vec<Product>, ProductError>;

    /// # Errors
    /// * `NotFound` - No product with this SKU
    async fn get_product(&self, sku: &Sku) -> Result<Product, ProductError>;

    /// # Errors
    /// * `AlreadyExists` - SKU is taken
    async fn create_product(&self, command: CreateProductCommand)
        -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - No product with this SKU
    async fn update_product(
        &self,
        sku: &Sku,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// Remove a product and return what was removed.
    ///
    /// # Errors
    /// * `NotFound` - No product with this SKU
    async fn delete_product(&self, sku: &Sku) -> Result<Product, ProductError>;
}

/// Persistence operations for products.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// # Errors
    /// * `AlreadyExists` - SKU is taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, product: Product) -> Result<Product, ProductError>;

    async fn find_by_sku(&self, sku: &Sku) -> Result<Option<Product>, ProductError>;

    /// All products ordered by SKU.
    async fn list_all(&self) -> Result<Vec<Product>, ProductError>;

    /// # Errors
    /// * `NotFound` - No product with this SKU
    async fn update(&self, product: Product) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - No product with this SKU
    async fn delete(&self, sku: &Sku) -> Result<Product, ProductError>;
}
