//! # Widget Host Trait
//!
//! Everything the controller needs from the page it is mounted into.
//! The browser implementation is `rack_wasm::DomHost`.

pub trait WidgetHost {
    /// Look up the mount element by id and hold on to it.
    /// Returns false if no such element exists.
    fn resolve_mount(&self, element_id: &str) -> bool;

    /// Whether the resolved mount element is still attached to the page
    fn is_attached(&self) -> bool;

    /// Whether a stylesheet with this id is already present page-wide
    fn has_stylesheet(&self, id: &str) -> bool;

    /// Add a stylesheet with this id page-wide
    fn inject_stylesheet(&self, id: &str, css: &str);

    /// Replace the mount element's whole content
    fn replace_content(&self, markup: &str);

    /// Set or clear the selected styling of the card with this key
    fn set_card_selected(&self, key: &str, selected: bool);

    /// Replace the text of the total line
    fn set_total_text(&self, text: &str);

    /// Enable or disable the checkout button
    fn set_checkout_enabled(&self, enabled: bool);

    /// Show a blocking message to the shopper
    fn alert(&self, message: &str);

    /// Full-page navigation
    fn navigate(&self, url: &str);
}
