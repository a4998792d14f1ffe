//! # Rack Configuration
//!
//! Options passed by the embedding page, resolved once at construction.

use crate::error::{RackError, RackResult};
use crate::product::Money;
use serde::Deserialize;
use std::fmt;
use std::rc::Rc;

/// Default catalog/checkout backend
pub const DEFAULT_BACKEND_URL: &str = "https://revshot-service.onrender.com/api";

/// Default id of the element the rack mounts into
pub const DEFAULT_MOUNT_ELEMENT_ID: &str = "checkout-rack-container";

/// Host callback receiving the new running total
pub type TotalHook = Rc<dyn Fn(Money)>;

/// Raw options as given by the embedder.
///
/// Legacy names are separate fields so pages passing both spellings still
/// load; the current name wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RackOptions {
    #[serde(default)]
    pub backend_base_url: Option<String>,

    #[serde(default)]
    pub api_base_url: Option<String>,

    #[serde(default)]
    pub base_amount: Option<i64>,

    #[serde(default)]
    pub original_amount: Option<i64>,

    #[serde(default)]
    pub success_url: Option<String>,

    #[serde(default)]
    pub cancel_url: Option<String>,

    #[serde(default)]
    pub mount_element_id: Option<String>,

    #[serde(default)]
    pub element_id: Option<String>,
}

impl RackOptions {
    /// Every option name the rack understands, including legacy aliases.
    /// The total callback is read separately since it is not data.
    pub const KNOWN: &'static [&'static str] = &[
        "backendBaseUrl",
        "apiBaseUrl",
        "baseAmount",
        "originalAmount",
        "onTotalChanged",
        "cartUpdateCallback",
        "successUrl",
        "cancelUrl",
        "mountElementId",
        "elementId",
    ];

    /// Names in `keys` that the rack does not recognize
    pub fn unrecognized<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        keys.into_iter()
            .filter(|k| !Self::KNOWN.contains(k))
            .map(String::from)
            .collect()
    }
}

/// Resolved, immutable rack configuration
#[derive(Clone)]
pub struct RackConfig {
    pub backend_base_url: String,
    pub base_amount: Money,
    pub mount_element_id: String,
    pub success_url: String,
    pub cancel_url: String,
    pub on_total_changed: Option<TotalHook>,
}

impl RackConfig {
    /// Apply defaults and validate.
    ///
    /// `page_url` is the current page, used for missing success/cancel URLs.
    pub fn resolve(options: RackOptions, page_url: &str) -> RackResult<Self> {
        let backend_base_url = options
            .backend_base_url
            .or(options.api_base_url)
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend_base_url = backend_base_url.trim().trim_end_matches('/').to_string();
        if backend_base_url.is_empty() {
            return Err(RackError::InvalidConfig(
                "backendBaseUrl must not be empty".to_string(),
            ));
        }

        let base_amount = options.base_amount.or(options.original_amount).unwrap_or(0);
        if !(0..=Money::MAX.cents()).contains(&base_amount) {
            return Err(RackError::InvalidConfig(format!(
                "baseAmount must be between 0 and {}, got {}",
                Money::MAX.cents(),
                base_amount
            )));
        }

        let mount_element_id = options
            .mount_element_id
            .or(options.element_id)
            .unwrap_or_else(|| DEFAULT_MOUNT_ELEMENT_ID.to_string());
        if mount_element_id.trim().is_empty() {
            return Err(RackError::InvalidConfig(
                "mountElementId must not be empty".to_string(),
            ));
        }

        Ok(Self {
            backend_base_url,
            base_amount: Money::from_cents(base_amount),
            mount_element_id,
            success_url: options.success_url.unwrap_or_else(|| page_url.to_string()),
            cancel_url: options.cancel_url.unwrap_or_else(|| page_url.to_string()),
            on_total_changed: None,
        })
    }

    /// Builder: set the host notification hook
    pub fn with_total_hook(mut self, hook: TotalHook) -> Self {
        self.on_total_changed = Some(hook);
        self
    }

    pub fn products_url(&self) -> String {
        format!("{}/products", self.backend_base_url)
    }

    pub fn checkout_url(&self) -> String {
        format!("{}/checkout", self.backend_base_url)
    }
}

impl fmt::Debug for RackConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RackConfig")
            .field("backend_base_url", &self.backend_base_url)
            .field("base_amount", &self.base_amount)
            .field("mount_element_id", &self.mount_element_id)
            .field("success_url", &self.success_url)
            .field("cancel_url", &self.cancel_url)
            .field("on_total_changed", &self.on_total_changed.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://shop.example/cart";

    #[test]
    fn test_defaults() {
        let config = RackConfig::resolve(RackOptions::default(), PAGE).unwrap();

        assert_eq!(config.backend_base_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.base_amount, Money::ZERO);
        assert_eq!(config.mount_element_id, DEFAULT_MOUNT_ELEMENT_ID);
        assert_eq!(config.success_url, PAGE);
        assert_eq!(config.cancel_url, PAGE);
        assert!(config.on_total_changed.is_none());
    }

    #[test]
    fn test_camel_case_and_legacy_names() {
        let options: RackOptions = serde_json::from_value(serde_json::json!({
            "backendBaseUrl": "https://api.example/v1/",
            "baseAmount": 1000,
            "successUrl": "https://shop.example/thanks"
        }))
        .unwrap();
        let config = RackConfig::resolve(options, PAGE).unwrap();
        assert_eq!(config.products_url(), "https://api.example/v1/products");
        assert_eq!(config.checkout_url(), "https://api.example/v1/checkout");
        assert_eq!(config.base_amount.cents(), 1000);
        assert_eq!(config.success_url, "https://shop.example/thanks");
        assert_eq!(config.cancel_url, PAGE);

        let legacy: RackOptions = serde_json::from_value(serde_json::json!({
            "apiBaseUrl": "https://legacy.example/api",
            "originalAmount": 250,
            "elementId": "rack"
        }))
        .unwrap();
        let config = RackConfig::resolve(legacy, PAGE).unwrap();
        assert_eq!(config.backend_base_url, "https://legacy.example/api");
        assert_eq!(config.base_amount.cents(), 250);
        assert_eq!(config.mount_element_id, "rack");
    }

    #[test]
    fn test_current_name_wins_over_legacy() {
        let both: RackOptions = serde_json::from_value(serde_json::json!({
            "backendBaseUrl": "https://new.example/api",
            "apiBaseUrl": "https://old.example/api",
            "baseAmount": 1000,
            "originalAmount": 5,
            "mountElementId": "rack",
            "elementId": "old-rack"
        }))
        .unwrap();
        let config = RackConfig::resolve(both, PAGE).unwrap();
        assert_eq!(config.backend_base_url, "https://new.example/api");
        assert_eq!(config.base_amount.cents(), 1000);
        assert_eq!(config.mount_element_id, "rack");
    }

    #[test]
    fn test_base_amount_must_fit_a_js_number() {
        let at_max = RackOptions {
            base_amount: Some(Money::MAX.cents()),
            ..Default::default()
        };
        assert_eq!(RackConfig::resolve(at_max, PAGE).unwrap().base_amount, Money::MAX);

        let past_max = RackOptions {
            original_amount: Some(Money::MAX.cents() + 1),
            ..Default::default()
        };
        assert!(matches!(
            RackConfig::resolve(past_max, PAGE),
            Err(RackError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_options() {
        let negative = RackOptions {
            base_amount: Some(-1),
            ..Default::default()
        };
        assert!(matches!(
            RackConfig::resolve(negative, PAGE),
            Err(RackError::InvalidConfig(_))
        ));

        let empty_url = RackOptions {
            backend_base_url: Some("/".to_string()),
            ..Default::default()
        };
        assert!(RackConfig::resolve(empty_url, PAGE).is_err());

        let empty_mount = RackOptions {
            mount_element_id: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(RackConfig::resolve(empty_mount, PAGE).is_err());

        let fractional = serde_json::from_value::<RackOptions>(serde_json::json!({"baseAmount": 10.5}));
        assert!(fractional.is_err());
    }

    #[test]
    fn test_unrecognized_options() {
        let unknown = RackOptions::unrecognized(["baseAmount", "theme", "onTotalChanged", "debug"]);
        assert_eq!(unknown, vec!["theme".to_string(), "debug".to_string()]);
    }

    #[test]
    fn test_total_hook() {
        use std::cell::Cell;

        let seen = Rc::new(Cell::new(0));
        let sink = seen.clone();
        let config = RackConfig::resolve(RackOptions::default(), PAGE)
            .unwrap()
            .with_total_hook(Rc::new(move |total: Money| sink.set(total.cents())));

        if let Some(hook) = &config.on_total_changed {
            hook(Money::from_cents(1500));
        }
        assert_eq!(seen.get(), 1500);
        assert!(format!("{:?}", config).contains("on_total_changed: true"));
    }
}
