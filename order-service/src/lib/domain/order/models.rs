use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::order::errors::OrderError;
use crate::domain::order::errors::OrderIdError;
use crate::domain::order::errors::OrderStatusError;
use crate::domain::order::errors::QuantityError;
use crate::domain::product::models::Price;
use crate::domain::product::models::Sku;
use crate::domain::user::models::Username;

/// Order unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderId(pub Uuid);

impl OrderId {
    /// Generate a new random order ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an order ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, OrderIdError> {
        Uuid::parse_str(s)
            .map(OrderId)
            .map_err(|e| OrderIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = OrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(OrderStatusError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of units of one line item. At least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(u32);

impl Quantity {
    /// # Errors
    /// * `Zero` - Quantity is zero
    pub fn new(quantity: u32) -> Result<Self, QuantityError> {
        if quantity == 0 {
            Err(QuantityError::Zero)
        } else {
            Ok(Self(quantity))
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// One line of an order, priced at the time the order was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub sku: Sku,
    pub price: Price,
    pub quantity: Quantity,
}

impl OrderItem {
    pub fn total(&self) -> f64 {
        self.price.value() * f64::from(self.quantity.value())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total: f64,
    pub user: Username,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Place a new order for `owner`.
    ///
    /// The total is always computed from the items.
    pub fn place(command: CreateOrderCommand, owner: Username) -> Self {
        let total = command.items.iter().map(OrderItem::total).sum();
        Self {
            id: OrderId::new(),
            items: command.items,
            status: command.status,
            total,
            user: owner,
            created_at: Utc::now(),
        }
    }
}

/// Command to place an order with at least one item.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
}

impl CreateOrderCommand {
    /// # Errors
    /// * `EmptyOrder` - No items given
    pub fn new(items: Vec<OrderItem>, status: OrderStatus) -> Result<Self, OrderError> {
        if items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        Ok(Self { items, status })
    }
}
