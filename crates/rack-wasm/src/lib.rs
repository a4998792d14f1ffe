//! # rack-wasm
//!
//! Browser build of the checkout rack.
//!
//! This crate provides:
//! - `CheckoutRack`, the class a storefront page instantiates
//! - `DomHost`, the web-sys implementation of `rack_core::WidgetHost`
//! - console logging for `tracing` and panics
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { CheckoutRack, formatPrice } from 'checkout-rack';
//!
//! await init();
//!
//! const rack = new CheckoutRack({
//!   backendBaseUrl: 'https://api.example/api',
//!   baseAmount: 1000,
//!   onTotalChanged: (total) => console.log('Total:', formatPrice(total)),
//! });
//!
//! // Single-page apps: tear down before unmounting the container
//! rack.destroy();
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build crates/rack-wasm --target web
//! ```

pub mod dom;
pub mod logging;
pub mod rack;

pub use dom::DomHost;
pub use rack::CheckoutRack;

use rack_core::Money;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    logging::init();
}

/// Format a price in cents for display ("$10.00")
#[wasm_bindgen(js_name = formatPrice)]
pub fn format_price(cents: f64) -> String {
    Money::from_cents(cents.round() as i64).display()
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1999.0), "$19.99");
        assert_eq!(format_price(100.0), "$1.00");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
