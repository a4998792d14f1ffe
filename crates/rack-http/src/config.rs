//! # Backend Configuration
//!
//! Where the catalog/checkout backend lives and how long to wait for it.

use rack_core::RackConfig;
use std::time::Duration;

/// HTTP backend configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL, without trailing slash (e.g. "https://api.example/api")
    pub base_url: String,

    /// Per-request timeout. Only honored natively; in the browser the
    /// fetch defaults apply.
    pub timeout: Option<Duration>,
}

impl BackendConfig {
    /// Create config for a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Take the base URL from a resolved rack configuration
    pub fn from_rack(config: &RackConfig) -> Self {
        Self::new(config.backend_base_url.clone())
    }

    /// Builder: set a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    pub fn checkout_url(&self) -> String {
        format!("{}/checkout", self.base_url)
    }
}
