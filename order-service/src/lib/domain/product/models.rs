use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::product::errors::PriceError;
use crate::domain::product::errors::SkuError;

/// Stock keeping unit, the unique key of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sku(String);

impl Sku {
    pub const MAX_LENGTH: usize = 64;

    /// # Errors
    /// * `Empty` - SKU is empty or whitespace only
    /// * `TooLong` - SKU exceeds [`Sku::MAX_LENGTH`] characters
    pub fn new(sku: String) -> Result<Self, SkuError> {
        let length = sku.chars().count();

        if sku.trim().is_empty() {
            Err(SkuError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(SkuError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(sku))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-negative finite unit price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// # Errors
    /// * `NotFinite` - NaN or infinite
    /// * `Negative` - Below zero
    pub fn new(amount: f64) -> Result<Self, PriceError> {
        if !amount.is_finite() {
            Err(PriceError::NotFinite)
        } else if amount < 0.0 {
            Err(PriceError::Negative(amount))
        } else {
            Ok(Self(amount))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Catalogue entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub sku: Sku,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(command: CreateProductCommand) -> Self {
        let now = Utc::now();
        Self {
            sku: command.sku,
            name: command.name,
            description: command.description,
            price: command.price,
            image_url: command.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an update in place, keeping the SKU and creation time.
    ///
    /// The image is only replaced when the update carries one.
    pub fn apply(&mut self, command: UpdateProductCommand) {
        self.name = command.name;
        self.description = command.description;
        self.price = command.price;
        if let Some(image_url) = command.image_url {
            self.image_url = Some(image_url);
        }
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub sku: Sku,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: Option<String>,
}
