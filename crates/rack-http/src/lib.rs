//! # rack-http
//!
//! HTTP backend for the checkout rack.
//!
//! `HttpBackend` implements [`rack_core::CatalogBackend`] over reqwest:
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `{base}/products` | Upsell catalog |
//! | POST | `{base}/checkout` | Create hosted checkout session |
//!
//! On `wasm32` reqwest goes through the browser's `fetch`; natively it uses
//! rustls, which is what the tests run against.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rack_http::{BackendConfig, HttpBackend};
//!
//! let backend = HttpBackend::new(BackendConfig::new("https://api.example/api"))?;
//! let catalog = backend.fetch_products().await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::HttpBackend;
pub use config::BackendConfig;
