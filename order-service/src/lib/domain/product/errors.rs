use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SkuError {
    #[error("SKU must not be empty")]
    Empty,

    #[error("SKU too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PriceError {
    #[error("Price must be a finite number")]
    NotFinite,

    #[error("Price must not be negative, got {0}")]
    Negative(f64),
}

/// Top-level error for all product-related operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Invalid SKU: {0}")]
    InvalidSku(#[from] SkuError),

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error("Product with sku {0} not found")]
    NotFound(String),

    #[error("Product with sku {0} already exists")]
    AlreadyExists(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
