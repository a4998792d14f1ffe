//! # Rack Error Types
//!
//! Typed error handling for the checkout rack.
//! Backend calls return `Result<T, BackendError>`; the widget wraps those
//! into `RackError` at the boundary of each async operation.

use thiserror::Error;

/// Failure talking to the catalog/checkout backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request never produced a response (DNS, CORS, connection reset)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Body was not the JSON we expected
    #[error("Decode error: {0}")]
    Decode(String),

    /// Body parsed but violates the contract (negative price, duplicate id, missing url)
    #[error("Schema violation: {0}")]
    Schema(String),
}

/// Error taxonomy of the widget
#[derive(Debug, Error)]
pub enum RackError {
    /// Mount element is missing; the instance never initializes
    #[error("Element with ID {element_id} not found")]
    MountNotFound { element_id: String },

    /// Product catalog could not be loaded; the widget renders empty
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(#[source] BackendError),

    /// Checkout session could not be created
    #[error("Checkout failed: {0}")]
    CheckoutFailed(#[source] BackendError),

    /// Embedder passed options we refuse to run with
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RackError {
    /// Returns true if this error is shown to the shopper
    pub fn is_user_visible(&self) -> bool {
        matches!(self, RackError::CheckoutFailed(_))
    }

    /// Returns true if the widget instance cannot continue after this error
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RackError::MountNotFound { .. } | RackError::InvalidConfig(_)
        )
    }
}

/// Result type alias for widget operations
pub type RackResult<T> = Result<T, RackError>;
