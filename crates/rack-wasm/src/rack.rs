//! # CheckoutRack
//!
//! The class exported to JavaScript. Construction resolves options, starts
//! bootstrap in the background and returns immediately.
//!
//! Clicks are handled by one delegated listener on the mount element, keyed
//! by `data-product-id` and the checkout button class, so full re-renders
//! never stack listeners. The listener is installed once bootstrap has
//! rendered and removed by `destroy()`.

use crate::dom::DomHost;
use js_sys::{Array, Function, Object, Reflect};
use rack_core::view::{CHECKOUT_BUTTON_CLASS, PRODUCT_ID_ATTR};
use rack_core::{
    Money, RackConfig, RackError, RackOptions, RackResult, SharedBackend, SubmitOutcome,
    TotalHook, Widget,
};
use rack_http::{BackendConfig, HttpBackend};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, error, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, Window};

type RackWidget = Widget<DomHost>;

/// Option names that may carry the total callback, newest first
const TOTAL_HOOK_OPTIONS: [&str; 2] = ["onTotalChanged", "cartUpdateCallback"];

/// Upsell rack mounted into a storefront page
#[wasm_bindgen]
pub struct CheckoutRack {
    widget: Rc<RackWidget>,
    binding: Rc<RefCell<Option<ClickBinding>>>,
}

#[wasm_bindgen]
impl CheckoutRack {
    /// Create the rack and start loading it.
    ///
    /// Throws only for invalid options; a missing mount element or an
    /// unreachable backend is logged to the console instead.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<CheckoutRack, JsValue> {
        let (window, config) = prepare(&options)?;
        let backend = HttpBackend::new(BackendConfig::from_rack(&config)).map_err(to_js_error)?;
        Self::launch(window, config, Rc::new(backend))
    }

    /// Detach the click listener, clear the mount element and ignore any
    /// request still in flight. The shared stylesheet stays.
    pub fn destroy(&self) {
        self.binding.borrow_mut().take();
        self.widget.destroy();
    }

    /// Running total in cents
    pub fn total(&self) -> f64 {
        self.widget.total().cents() as f64
    }

    /// Ids of the selected products, in pick order
    #[wasm_bindgen(js_name = selectedIds)]
    pub fn selected_ids(&self) -> Array {
        self.widget
            .selection()
            .iter()
            .map(|p| JsValue::from_str(&p.key()))
            .collect()
    }

    /// Number of products in the loaded catalog
    #[wasm_bindgen(js_name = productCount)]
    pub fn product_count(&self) -> u32 {
        self.widget.product_count() as u32
    }
}

impl CheckoutRack {
    /// Create the rack over any catalog backend instead of the HTTP one
    pub fn with_backend(options: JsValue, backend: SharedBackend) -> Result<CheckoutRack, JsValue> {
        let (window, config) = prepare(&options)?;
        Self::launch(window, config, backend)
    }

    /// The controller behind this handle
    pub fn widget(&self) -> &Widget<DomHost> {
        &self.widget
    }

    /// Whether the delegated click listener is installed
    pub fn is_listening(&self) -> bool {
        self.binding.borrow().is_some()
    }

    fn launch(
        window: Window,
        config: RackConfig,
        backend: SharedBackend,
    ) -> Result<CheckoutRack, JsValue> {
        let host = DomHost::new(window)?;
        let widget = Rc::new(Widget::new(config, host, backend));
        let binding = Rc::new(RefCell::new(None));

        spawn_local(start(widget.clone(), binding.clone()));

        Ok(Self { widget, binding })
    }
}

/// Install logging and resolve options against the current page
fn prepare(options: &JsValue) -> Result<(Window, RackConfig), JsValue> {
    crate::logging::init();

    let window =
        web_sys::window().ok_or_else(|| JsValue::from_str("checkout-rack needs a browser window"))?;
    let page_url = window.location().href().unwrap_or_default();
    let config = resolve_config(options, &page_url).map_err(to_js_error)?;
    Ok((window, config))
}

/// Bootstrap, then wire up click handling
async fn start(widget: Rc<RackWidget>, binding: Rc<RefCell<Option<ClickBinding>>>) {
    // Failures are logged by the widget
    if widget.bootstrap().await.is_err() || !widget.is_ready() {
        return;
    }

    let Some(mount) = widget.host().mount() else {
        return;
    };
    match ClickBinding::attach(&mount, Rc::downgrade(&widget)) {
        Ok(attached) => *binding.borrow_mut() = Some(attached),
        Err(e) => error!("Failed to attach click handler: {:?}", e),
    }
}

/// Delegated click listener; removed on drop
struct ClickBinding {
    target: Element,
    handler: Closure<dyn FnMut(Event)>,
}

impl ClickBinding {
    fn attach(target: &Element, widget: Weak<RackWidget>) -> Result<Self, JsValue> {
        let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(widget) = widget.upgrade() {
                on_click(&widget, &event);
            }
        });
        target.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            handler,
        })
    }
}

impl Drop for ClickBinding {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback("click", self.handler.as_ref().unchecked_ref())
        {
            warn!("Failed to detach click handler: {:?}", e);
        }
    }
}

fn on_click(widget: &Rc<RackWidget>, event: &Event) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };

    if let Ok(Some(_)) = target.closest(&format!(".{}", CHECKOUT_BUTTON_CLASS)) {
        let widget = widget.clone();
        spawn_local(async move {
            if let SubmitOutcome::Redirected(url) = widget.checkout().await {
                debug!("Leaving page for {}", url);
            }
        });
        return;
    }

    if let Ok(Some(card)) = target.closest(&format!("[{}]", PRODUCT_ID_ATTR)) {
        if let Some(key) = card.get_attribute(PRODUCT_ID_ATTR) {
            widget.toggle(&key);
        }
    }
}

/// Turn the JS options object into a resolved configuration
fn resolve_config(options: &JsValue, page_url: &str) -> RackResult<RackConfig> {
    if options.is_undefined() || options.is_null() {
        return RackConfig::resolve(RackOptions::default(), page_url);
    }
    if !options.is_object() {
        return Err(RackError::InvalidConfig(
            "options must be an object".to_string(),
        ));
    }

    let raw: RackOptions = serde_wasm_bindgen::from_value(options.clone())
        .map_err(|e| RackError::InvalidConfig(e.to_string()))?;

    let keys: Vec<String> = Object::keys(options.unchecked_ref::<Object>())
        .iter()
        .filter_map(|k| k.as_string())
        .collect();
    for key in RackOptions::unrecognized(keys.iter().map(String::as_str)) {
        warn!("Ignoring unrecognized option {:?}", key);
    }

    let config = RackConfig::resolve(raw, page_url)?;
    Ok(match total_hook(options) {
        Some(hook) => config.with_total_hook(hook),
        None => config,
    })
}

fn total_hook(options: &JsValue) -> Option<TotalHook> {
    let callback = TOTAL_HOOK_OPTIONS.iter().find_map(|name| {
        Reflect::get(options, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.dyn_into::<Function>().ok())
    })?;

    Some(Rc::new(move |total: Money| {
        let arg = JsValue::from_f64(total.cents() as f64);
        if let Err(e) = callback.call1(&JsValue::NULL, &arg) {
            warn!("onTotalChanged threw: {:?}", e);
        }
    }))
}

fn to_js_error(err: RackError) -> JsValue {
    JsError::new(&err.to_string()).into()
}
