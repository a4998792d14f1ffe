//! # rack-core
//!
//! Core types and controller for the checkout-rack upsell widget.
//!
//! This crate provides:
//! - `Product`, `Catalog` and `Money` for the upsell catalog
//! - `Cart` for the shopper's selection and the derived running total
//! - `RackOptions` / `RackConfig` for resolving embedder options
//! - `CatalogBackend` trait for the two backend calls (products, checkout)
//! - `WidgetHost` trait for the page the widget is mounted into
//! - `Widget`, the controller that runs bootstrap, render, toggle and checkout
//! - `RackError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use rack_core::{RackConfig, RackOptions, Widget};
//!
//! let config = RackConfig::resolve(RackOptions::default(), "https://shop.example/cart")?;
//! let widget = Widget::new(config, host, backend);
//!
//! // Mount, inject styles, fetch the catalog and render
//! widget.bootstrap().await?;
//!
//! // Shopper clicks a card
//! widget.toggle("sku-1");
//!
//! // Shopper clicks "Proceed to Checkout"
//! widget.checkout().await;
//! ```

pub mod backend;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod host;
pub mod product;
pub mod view;
pub mod widget;

// Re-exports for convenience
pub use backend::{CatalogBackend, SharedBackend};
pub use cart::{Cart, Toggled};
pub use checkout::{CheckoutRedirect, CheckoutRequest};
pub use config::{RackConfig, RackOptions, TotalHook};
pub use error::{BackendError, RackError, RackResult};
pub use host::WidgetHost;
pub use product::{Catalog, Money, Product, ProductId};
pub use view::{DEFAULT_STYLESHEET, STYLESHEET_ID};
pub use widget::{SubmitOutcome, Widget};
