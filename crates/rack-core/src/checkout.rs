//! # Checkout Wire Types
//!
//! Body of `POST {backend}/checkout` and its response.

use crate::cart::Cart;
use crate::error::BackendError;
use crate::product::{Money, Product};
use serde::{Deserialize, Serialize};

/// Checkout request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutRequest {
    /// Full records of the selected products, in pick order
    pub items: Vec<Product>,
    /// Base amount already committed outside the rack
    pub original_amount: Money,
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutRequest {
    /// Snapshot the current selection
    pub fn from_cart(cart: &Cart, success_url: &str, cancel_url: &str) -> Self {
        Self {
            items: cart.selection().to_vec(),
            original_amount: cart.base_amount(),
            success_url: success_url.to_string(),
            cancel_url: cancel_url.to_string(),
        }
    }
}

/// Where to send the shopper after a checkout session is created
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutRedirect {
    pub url: String,
}

impl CheckoutRedirect {
    /// Parse and validate a `/checkout` response body
    pub fn from_json(body: &str) -> Result<Self, BackendError> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| BackendError::Decode(e.to_string()))?;

        match value.get("url").and_then(|v| v.as_str()) {
            Some(url) if !url.trim().is_empty() => Ok(Self {
                url: url.to_string(),
            }),
            Some(_) => Err(BackendError::Schema("empty url in checkout response".to_string())),
            None => Err(BackendError::Schema(
                "checkout response has no url".to_string(),
            )),
        }
    }
}
