use thiserror::Error;

use crate::domain::product::errors::PriceError;
use crate::domain::product::errors::SkuError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderStatusError {
    #[error("Unknown order status: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Quantity must be at least 1")]
    Zero,
}

/// Top-level error for all order-related operations
#[derive(Debug, Clone, Error)]
pub enum OrderError {
    #[error("Invalid SKU: {0}")]
    InvalidSku(#[from] SkuError),

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] OrderStatusError),

    #[error("Order must contain at least one product")]
    EmptyOrder,

    #[error("Order with id {0} not found")]
    NotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
