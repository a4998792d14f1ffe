//! # Product Types
//!
//! Catalog types for the checkout rack.
//! Products are fetched from `GET {backend}/products` once per page load.

use crate::error::BackendError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Amount in minor currency units (cents)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Largest amount a JavaScript number holds exactly (2^53 - 1)
    pub const MAX: Money = Money(9_007_199_254_740_991);

    /// Create an amount from minor units
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Get the amount in minor units
    pub fn cents(self) -> i64 {
        self.0
    }

    /// Add, returning `None` past [`Money::MAX`]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0
            .checked_add(rhs.0)
            .filter(|sum| *sum <= Money::MAX.0)
            .map(Money)
    }

    /// Add, clamping at [`Money::MAX`]
    pub fn saturating_add(self, rhs: Money) -> Money {
        self.checked_add(rhs).unwrap_or(Money::MAX)
    }

    /// Format for display (e.g., "$10.00")
    pub fn display(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        self.saturating_add(rhs)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

/// Product identifier as sent by the backend (string or integer)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl ProductId {
    /// Canonical text form, as written into the card's `data-product-id`
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Check whether a card attribute refers to this identifier
    pub fn matches(&self, key: &str) -> bool {
        match self {
            ProductId::Text(s) => s == key,
            ProductId::Number(n) => n.to_string() == key,
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Number(n)
    }
}

/// An upsell product offered by the rack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Image URL shown on the card
    pub image_url: String,

    /// Price in minor currency units
    pub price: Money,
}

impl Product {
    /// Create a new product
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        image_url: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Canonical card key
    pub fn key(&self) -> String {
        self.id.key()
    }
}

/// Ordered product catalog, in backend order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Build a catalog, enforcing the backend contract.
    ///
    /// Rejects negative prices, identifiers whose card keys collide, and
    /// catalogs whose combined price does not fit in [`Money::MAX`].
    pub fn from_products(products: Vec<Product>) -> Result<Self, BackendError> {
        let mut seen = HashSet::with_capacity(products.len());
        let mut combined = Money::ZERO;
        for product in &products {
            if product.price.cents() < 0 {
                return Err(BackendError::Schema(format!(
                    "product {} has negative price {}",
                    product.id,
                    product.price.cents()
                )));
            }
            combined = combined.checked_add(product.price).ok_or_else(|| {
                BackendError::Schema(format!(
                    "product {} pushes the catalog total past {}",
                    product.id,
                    Money::MAX.cents()
                ))
            })?;
            if !seen.insert(product.key()) {
                return Err(BackendError::Schema(format!(
                    "duplicate product id {}",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    /// Parse and validate a `/products` response body
    pub fn from_json(body: &str) -> Result<Self, BackendError> {
        let products: Vec<Product> =
            serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()))?;
        Self::from_products(products)
    }

    /// Find a product by card key
    pub fn get(&self, key: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.matches(key))
    }

    /// Products in display order
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
