//! # Cart State
//!
//! Catalog plus the shopper's selection. The running total is always
//! recomputed from the selection, never accumulated.

use crate::product::{Catalog, Money, Product};

/// Result of an effective toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggled {
    /// Whether the product is selected after the toggle
    pub selected: bool,
    /// Running total after the toggle
    pub total: Money,
}

/// Selection state over a fixed catalog
#[derive(Debug, Clone, Default)]
pub struct Cart {
    catalog: Catalog,
    /// Selected products, in the order they were picked
    selection: Vec<Product>,
    base_amount: Money,
}

impl Cart {
    /// Create an empty cart with no catalog yet
    pub fn new(base_amount: Money) -> Self {
        Self {
            catalog: Catalog::new(),
            selection: Vec::new(),
            base_amount,
        }
    }

    /// Replace the catalog wholesale. Clears the selection.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.selection.clear();
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn base_amount(&self) -> Money {
        self.base_amount
    }

    /// Flip the selection state of the product behind a card key.
    ///
    /// Returns `None` when the key is not in the catalog; nothing changes then.
    pub fn toggle(&mut self, key: &str) -> Option<Toggled> {
        let product = self.catalog.get(key)?;

        let selected = match self.selection.iter().position(|p| p.id == product.id) {
            Some(index) => {
                self.selection.remove(index);
                false
            }
            None => {
                self.selection.push(product.clone());
                true
            }
        };

        Some(Toggled {
            selected,
            total: self.total(),
        })
    }

    /// Check if the product behind a card key is selected
    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.iter().any(|p| p.id.matches(key))
    }

    /// Selected products in pick order
    pub fn selection(&self) -> &[Product] {
        &self.selection
    }

    /// Sum of selected prices
    pub fn subtotal(&self) -> Money {
        self.selection.iter().map(|p| p.price).sum()
    }

    /// Base amount plus the selected prices, clamped at [`Money::MAX`]
    pub fn total(&self) -> Money {
        self.base_amount.saturating_add(self.subtotal())
    }
}
