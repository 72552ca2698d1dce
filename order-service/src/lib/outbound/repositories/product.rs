use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::Sku;
use crate::domain::product::ports::ProductRepository;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: PgRow) -> Result<Product, ProductError> {
        let column = |e: sqlx::Error| ProductError::DatabaseError(e.to_string());

        Ok(Product {
            sku: Sku::new(row.try_get("sku").map_err(column)?)?,
            name: row.try_get("name").map_err(column)?,
            description: row.try_get("description").map_err(column)?,
            price: Price::new(row.try_get("price").map_err(column)?)?,
            image_url: row.try_get("image_url").map_err(column)?,
            created_at: row.try_get("created_at").map_err(column)?,
            updated_at: row.try_get("updated_at").map_err(column)?,
        })
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, ProductError> {
        sqlx::query(
            r#"
            INSERT INTO products (sku, name, description, price, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(product.sku.as_str())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.value())
        .bind(product.image_url.as_deref())
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return ProductError::AlreadyExists(product.sku.to_string());
                }
            }
            ProductError::DatabaseError(e.to_string())
        })?;

        Ok(product)
    }

    async fn find_by_sku(&self, sku: &Sku) -> Result<Option<Product>, ProductError> {
        let row = sqlx::query(
            r#"
            SELECT sku, name, description, price, image_url, created_at, updated_at
            FROM products
            WHERE sku = $1
            "#,
        )
        .bind(sku.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_product).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let rows = sqlx::query(
            r#"
            SELECT sku, name, description, price, image_url, created_at, updated_at
            FROM products
            ORDER BY sku
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, image_url = $5, updated_at = $6
            WHERE sku = $1
            "#,
        )
        .bind(product.sku.as_str())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.value())
        .bind(product.image_url.as_deref())
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(product.sku.to_string()));
        }

        Ok(product)
    }

    async fn delete(&self, sku: &Sku) -> Result<Product, ProductError> {
        let row = sqlx::query(
            r#"
            DELETE FROM products
            WHERE sku = $1
            RETURNING sku, name, description, price, image_url, created_at, updated_at
            "#,
        )
        .bind(sku.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => Self::row_to_product(r),
            None => Err(ProductError::NotFound(sku.to_string())),
        }
    }
}
