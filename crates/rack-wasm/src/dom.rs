//! # DOM Host
//!
//! web-sys implementation of [`WidgetHost`]. All lookups are scoped to the
//! mount element except the page-wide stylesheet.

use rack_core::view::{
    CARD_CLASS, CHECKOUT_BUTTON_CLASS, PRODUCT_ID_ATTR, SELECTED_CLASS, TOTAL_CLASS,
};
use rack_core::WidgetHost;
use std::cell::RefCell;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{css, Document, Element, HtmlButtonElement, Window};

pub struct DomHost {
    window: Window,
    document: Document,
    mount: RefCell<Option<Element>>,
}

impl DomHost {
    /// Create a host for the page behind `window`
    pub fn new(window: Window) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("checkout-rack needs a document"))?;
        Ok(Self {
            window,
            document,
            mount: RefCell::new(None),
        })
    }

    /// The resolved mount element, if any
    pub fn mount(&self) -> Option<Element> {
        self.mount.borrow().clone()
    }

    fn find(&self, class: &str) -> Option<Element> {
        let mount = self.mount.borrow();
        mount
            .as_ref()?
            .query_selector(&format!(".{}", class))
            .ok()
            .flatten()
    }
}

fn log_dom_error(action: &str, err: JsValue) {
    warn!("DOM {} failed: {:?}", action, err);
}

impl WidgetHost for DomHost {
    fn resolve_mount(&self, element_id: &str) -> bool {
        let element = self.document.get_element_by_id(element_id);
        let found = element.is_some();
        *self.mount.borrow_mut() = element;
        found
    }

    fn is_attached(&self) -> bool {
        self.mount
            .borrow()
            .as_ref()
            .map_or(false, |m| m.is_connected())
    }

    fn has_stylesheet(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn inject_stylesheet(&self, id: &str, css: &str) {
        let style = match self.document.create_element("style") {
            Ok(style) => style,
            Err(e) => return log_dom_error("create <style>", e),
        };
        style.set_id(id);
        style.set_text_content(Some(css));

        let parent: Option<Element> = match self.document.head() {
            Some(head) => Some(head.into()),
            None => self.document.document_element(),
        };
        match parent {
            Some(parent) => {
                if let Err(e) = parent.append_child(&style) {
                    log_dom_error("append <style>", e);
                }
            }
            None => warn!("No <head> to attach stylesheet #{} to", id),
        }
    }

    fn replace_content(&self, markup: &str) {
        if let Some(mount) = self.mount.borrow().as_ref() {
            mount.set_inner_html(markup);
        }
    }

    fn set_card_selected(&self, key: &str, selected: bool) {
        let mount = self.mount.borrow();
        let Some(mount) = mount.as_ref() else {
            return;
        };
        let selector = format!(
            ".{}[{}=\"{}\"]",
            CARD_CLASS,
            PRODUCT_ID_ATTR,
            css::escape(key)
        );
        match mount.query_selector(&selector) {
            Ok(Some(card)) => {
                if let Err(e) = card.class_list().toggle_with_force(SELECTED_CLASS, selected) {
                    log_dom_error("toggle selected class", e);
                }
            }
            Ok(None) => {}
            Err(e) => log_dom_error("query card", e),
        }
    }

    fn set_total_text(&self, text: &str) {
        if let Some(total) = self.find(TOTAL_CLASS) {
            total.set_text_content(Some(text));
        }
    }

    fn set_checkout_enabled(&self, enabled: bool) {
        if let Some(button) = self
            .find(CHECKOUT_BUTTON_CLASS)
            .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok())
        {
            button.set_disabled(!enabled);
        }
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log_dom_error("alert", e);
        }
    }

    fn navigate(&self, url: &str) {
        if let Err(e) = self.window.location().set_href(url) {
            log_dom_error("navigate", e);
        }
    }
}
