//! # Widget Controller
//!
//! Runs the rack's lifecycle against a [`WidgetHost`] and a [`CatalogBackend`]:
//!
//! ```text
//!  bootstrap ──▶ render ──▶ toggle / checkout (until navigation or destroy)
//!     │
//!     ├── resolve mount (missing: abort)
//!     ├── inject stylesheet once per page
//!     └── fetch catalog (failure: empty catalog)
//! ```
//!
//! State lives in a `RefCell`; no borrow is held across an `.await`, so
//! clicks arriving while a request is pending see consistent state.

use crate::backend::SharedBackend;
use crate::cart::Cart;
use crate::checkout::CheckoutRequest;
use crate::config::RackConfig;
use crate::error::{RackError, RackResult};
use crate::host::WidgetHost;
use crate::product::{Money, Product};
use crate::view::{self, DEFAULT_STYLESHEET, STYLESHEET_ID};
use std::borrow::Cow;
use std::cell::RefCell;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Constructed, bootstrap not finished
    Starting,
    /// Rendered and interactive
    Ready,
    /// Mount element missing; nothing will ever happen
    Aborted,
    /// Torn down by the host
    Destroyed,
}

#[derive(Debug)]
struct WidgetState {
    phase: Phase,
    cart: Cart,
    checkout_in_flight: bool,
}

/// How a checkout click ended
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Shopper was sent to this URL
    Redirected(String),
    /// Shopper was told about the failure and can click again
    Failed(RackError),
    /// Click ignored (request already in flight, not ready, or destroyed)
    Skipped,
}

/// The checkout rack controller
pub struct Widget<H: WidgetHost> {
    config: RackConfig,
    host: H,
    backend: SharedBackend,
    stylesheet: Cow<'static, str>,
    state: RefCell<WidgetState>,
}

impl<H: WidgetHost> Widget<H> {
    /// Create a widget. Nothing touches the page until [`Widget::bootstrap`].
    pub fn new(config: RackConfig, host: H, backend: SharedBackend) -> Self {
        let cart = Cart::new(config.base_amount);
        Self {
            config,
            host,
            backend,
            stylesheet: Cow::Borrowed(DEFAULT_STYLESHEET),
            state: RefCell::new(WidgetState {
                phase: Phase::Starting,
                cart,
                checkout_in_flight: false,
            }),
        }
    }

    /// Builder: replace the shipped stylesheet
    pub fn with_stylesheet(mut self, css: impl Into<Cow<'static, str>>) -> Self {
        self.stylesheet = css.into();
        self
    }

    pub fn config(&self) -> &RackConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mount, inject styles, load the catalog and render.
    ///
    /// Only a missing mount element is an error; catalog failures degrade to
    /// an empty rack and still return `Ok`.
    pub async fn bootstrap(&self) -> RackResult<()> {
        if self.state.borrow().phase != Phase::Starting {
            debug!("bootstrap already ran");
            return Ok(());
        }

        let element_id = &self.config.mount_element_id;
        if !self.host.resolve_mount(element_id) {
            let err = RackError::MountNotFound {
                element_id: element_id.clone(),
            };
            error!("{}", err);
            self.state.borrow_mut().phase = Phase::Aborted;
            return Err(err);
        }

        self.ensure_stylesheet();

        let catalog = match self.backend.fetch_products().await {
            Ok(catalog) => {
                info!(
                    "Loaded {} products from {}",
                    catalog.len(),
                    self.backend.backend_name()
                );
                catalog
            }
            Err(e) => {
                let err = RackError::CatalogUnavailable(e);
                error!("Error loading products: {}", err);
                Default::default()
            }
        };

        {
            let mut state = self.state.borrow_mut();
            if state.phase == Phase::Destroyed {
                debug!("widget destroyed while loading products");
                return Ok(());
            }
            state.cart.replace_catalog(catalog);
        }

        if !self.host.is_attached() {
            warn!(
                "Mount element {} was removed before the rack could render",
                element_id
            );
            return Ok(());
        }

        self.state.borrow_mut().phase = Phase::Ready;
        self.render();
        Ok(())
    }

    fn ensure_stylesheet(&self) {
        if self.host.has_stylesheet(STYLESHEET_ID) {
            return;
        }
        self.host.inject_stylesheet(STYLESHEET_ID, &self.stylesheet);
        debug!("Injected stylesheet #{}", STYLESHEET_ID);
    }

    /// Full re-render of the mount element from current state
    pub fn render(&self) {
        let (markup, in_flight) = {
            let state = self.state.borrow();
            if state.phase != Phase::Ready {
                return;
            }
            (view::render(&state.cart), state.checkout_in_flight)
        };
        self.host.replace_content(&markup);
        if in_flight {
            self.host.set_checkout_enabled(false);
        }
    }

    /// Card click: flip the product behind `key` in or out of the selection.
    ///
    /// Unknown keys are ignored. Returns the new total when something changed.
    pub fn toggle(&self, key: &str) -> Option<Money> {
        let toggled = {
            let mut state = self.state.borrow_mut();
            if state.phase != Phase::Ready {
                return None;
            }
            let Some(toggled) = state.cart.toggle(key) else {
                debug!("Ignoring click on unknown product {:?}", key);
                return None;
            };
            toggled
        };

        debug!(
            "Toggled product {} (selected={}), total={}",
            key, toggled.selected, toggled.total
        );

        // Only the clicked card changes state
        if self.host.is_attached() {
            self.host.set_card_selected(key, toggled.selected);
            self.host.set_total_text(&view::total_label(toggled.total));
        }

        if let Some(hook) = &self.config.on_total_changed {
            hook(toggled.total);
        }

        Some(toggled.total)
    }

    /// Checkout click: create a session and leave the page.
    ///
    /// While a submission is in flight the button is disabled and further
    /// clicks are skipped.
    pub async fn checkout(&self) -> SubmitOutcome {
        let request = {
            let mut state = self.state.borrow_mut();
            if state.phase != Phase::Ready {
                return SubmitOutcome::Skipped;
            }
            if state.checkout_in_flight {
                debug!("Checkout already in flight, ignoring click");
                return SubmitOutcome::Skipped;
            }
            state.checkout_in_flight = true;
            CheckoutRequest::from_cart(
                &state.cart,
                &self.config.success_url,
                &self.config.cancel_url,
            )
        };
        self.host.set_checkout_enabled(false);

        info!(
            "Submitting checkout: {} items, original_amount={}",
            request.items.len(),
            request.original_amount
        );

        let result = self.backend.create_checkout(&request).await;

        let destroyed = {
            let mut state = self.state.borrow_mut();
            state.checkout_in_flight = false;
            state.phase == Phase::Destroyed
        };
        if destroyed {
            debug!("widget destroyed during checkout, dropping result");
            return SubmitOutcome::Skipped;
        }

        match result {
            Ok(redirect) => {
                info!("Redirecting to checkout: {}", redirect.url);
                self.host.navigate(&redirect.url);
                SubmitOutcome::Redirected(redirect.url)
            }
            Err(e) => {
                let err = RackError::CheckoutFailed(e);
                error!("Error during checkout: {}", err);
                self.host.alert(view::CHECKOUT_FAILED_MESSAGE);
                if self.host.is_attached() {
                    self.host.set_checkout_enabled(true);
                }
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Tear down: clear the mount element and ignore any late completions.
    /// The page-wide stylesheet is left in place.
    pub fn destroy(&self) {
        let was_ready = {
            let mut state = self.state.borrow_mut();
            if state.phase == Phase::Destroyed {
                return;
            }
            let was_ready = state.phase == Phase::Ready;
            state.phase = Phase::Destroyed;
            was_ready
        };
        if was_ready && self.host.is_attached() {
            self.host.replace_content("");
        }
        debug!("Destroyed rack on #{}", self.config.mount_element_id);
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().phase == Phase::Destroyed
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().phase == Phase::Ready
    }

    /// Current running total
    pub fn total(&self) -> Money {
        self.state.borrow().cart.total()
    }

    /// Selected products in pick order
    pub fn selection(&self) -> Vec<Product> {
        self.state.borrow().cart.selection().to_vec()
    }

    pub fn product_count(&self) -> usize {
        self.state.borrow().cart.catalog().len()
    }

    pub fn checkout_in_flight(&self) -> bool {
        self.state.borrow().checkout_in_flight
    }
}
