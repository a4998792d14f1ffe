//! # HTTP Backend
//!
//! reqwest implementation of the two backend calls.

use crate::config::BackendConfig;
use async_trait::async_trait;
use rack_core::{
    BackendError, Catalog, CatalogBackend, CheckoutRedirect, CheckoutRequest, RackError,
    RackResult,
};
use reqwest::{Client, Response};
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// Catalog/checkout backend reached over HTTP
pub struct HttpBackend {
    config: BackendConfig,
    client: Client,
}

impl HttpBackend {
    /// Create a backend client
    pub fn new(config: BackendConfig) -> RackResult<Self> {
        let builder = Client::builder();

        #[cfg(not(target_arch = "wasm32"))]
        let builder = match config.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        let client = builder
            .build()
            .map_err(|e| RackError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Read the body and fail on non-success statuses
    async fn read_body(response: Response) -> Result<String, BackendError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Backend error: status={}, body={}", status, body);
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait(?Send)]
impl CatalogBackend for HttpBackend {
    #[instrument(skip(self), fields(base_url = %self.config.base_url))]
    async fn fetch_products(&self) -> Result<Catalog, BackendError> {
        let response = self
            .client
            .get(self.config.products_url())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let body = Self::read_body(response).await?;
        let catalog = Catalog::from_json(&body)?;

        debug!("Fetched {} products", catalog.len());
        Ok(catalog)
    }

    #[instrument(skip(self, request), fields(base_url = %self.config.base_url, items = request.items.len()))]
    async fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutRedirect, BackendError> {
        let idempotency_key = Uuid::new_v4().to_string();

        let response = self
            .client
            .post(self.config.checkout_url())
            .header("Idempotency-Key", &idempotency_key)
            .json(request)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let body = Self::read_body(response).await?;
        let redirect = CheckoutRedirect::from_json(&body)?;

        debug!(
            "Created checkout session: key={}, url={}",
            idempotency_key, redirect.url
        );
        Ok(redirect)
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}
