use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::order::errors::OrderError;
use crate::domain::order::models::Order;
use crate::domain::order::models::OrderId;
use crate::domain::order::models::OrderItem;
use crate::domain::order::models::Quantity;
use crate::domain::order::ports::OrderRepository;
use crate::domain::product::models::Price;
use crate::domain::product::models::Sku;
use crate::domain::user::models::Username;

/// Line item as stored in the `items` JSONB column.
#[derive(Debug, Serialize, Deserialize)]
struct ItemRecord {
    sku: String,
    price: f64,
    quantity: u32,
}

impl From<&OrderItem> for ItemRecord {
    fn from(item: &OrderItem) -> Self {
        Self {
            sku: item.sku.to_string(),
            price: item.price.value(),
            quantity: item.quantity.value(),
        }
    }
}

impl TryFrom<ItemRecord> for OrderItem {
    type Error = OrderError;

    fn try_from(record: ItemRecord) -> Result<Self, Self::Error> {
        Ok(OrderItem {
            sku: Sku::new(record.sku)?,
            price: Price::new(record.price)?,
            quantity: Quantity::new(record.quantity)?,
        })
    }
}

pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_order(row: PgRow) -> Result<Order, OrderError> {
        let column = |e: sqlx::Error| OrderError::DatabaseError(e.to_string());

        let id: Uuid = row.try_get("id").map_err(column)?;
        let Json(records): Json<Vec<ItemRecord>> = row.try_get("items").map_err(column)?;
        let status: String = row.try_get("status").map_err(column)?;
        let username: String = row.try_get("username").map_err(column)?;

        Ok(Order {
            id: OrderId(id),
            items: records
                .into_iter()
                .map(OrderItem::try_from)
                .collect::<Result<_, _>>()?,
            status: status.parse()?,
            total: row.try_get("total").map_err(column)?,
            user: Username::new(username)
                .map_err(|e| OrderError::DatabaseError(e.to_string()))?,
            created_at: row.try_get("created_at").map_err(column)?,
        })
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, OrderError> {
        let items: Vec<ItemRecord> = order.items.iter().map(ItemRecord::from).collect();

        sqlx::query(
            r#"
            INSERT INTO orders (id, items, status, total, username, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(Json(items))
        .bind(order.status.as_str())
        .bind(order.total)
        .bind(order.user.as_str())
        .bind(order.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        Ok(order)
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, OrderError> {
        let row = sqlx::query(
            r#"
            SELECT id, items, status, total, username, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_order).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Order>, OrderError> {
        let rows = sqlx::query(
            r#"
            SELECT id, items, status, total, username, created_at
            FROM orders
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_order).collect()
    }

    async fn find_by_user(&self, username: &Username) -> Result<Vec<Order>, OrderError> {
        let rows = sqlx::query(
            r#"
            SELECT id, items, status, total, username, created_at
            FROM orders
            WHERE username = $1
            ORDER BY created_at
            "#,
        )
        .bind(username.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_order).collect()
    }
}
