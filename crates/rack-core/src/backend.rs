//! # Catalog Backend Trait
//!
//! The two network calls the rack makes. The HTTP implementation lives in
//! `rack-http`; tests plug in in-memory backends.
//!
//! Futures are `?Send`: in the browser they run on the page's event loop and
//! hold JS handles.

use crate::checkout::{CheckoutRedirect, CheckoutRequest};
use crate::error::BackendError;
use crate::product::Catalog;
use async_trait::async_trait;
use std::rc::Rc;

#[async_trait(?Send)]
pub trait CatalogBackend {
    /// Fetch and validate the upsell catalog (`GET /products`).
    async fn fetch_products(&self) -> Result<Catalog, BackendError>;

    /// Create a hosted checkout session (`POST /checkout`).
    ///
    /// # Returns
    /// The destination the shopper must be sent to.
    async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutRedirect, BackendError>;

    /// Backend name (for logging).
    fn backend_name(&self) -> &'static str;
}

/// Shared handle to a backend
pub type SharedBackend = Rc<dyn CatalogBackend>;
