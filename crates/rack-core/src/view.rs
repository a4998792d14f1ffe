//! # View
//!
//! Markup for a full render of the rack. Class names here are the contract
//! with the stylesheet and with the click delegation in `rack-wasm`.

use crate::cart::Cart;
use crate::product::{Money, Product};
use v_htmlescape::escape;

/// Id of the page-wide `<style>` element
pub const STYLESHEET_ID: &str = "checkout-rack-styles";

/// Default presentation rules, shipped inside the module
pub const DEFAULT_STYLESHEET: &str = include_str!("../assets/checkout-rack.css");

pub const HEADING: &str = "You Might Also Like";
pub const CHECKOUT_LABEL: &str = "Proceed to Checkout";
pub const CHECKOUT_FAILED_MESSAGE: &str =
    "There was an error processing your checkout. Please try again.";

pub const CARD_CLASS: &str = "product-card";
pub const SELECTED_CLASS: &str = "selected";
pub const TOTAL_CLASS: &str = "total-price";
pub const CHECKOUT_BUTTON_CLASS: &str = "checkout-button";
pub const PRODUCT_ID_ATTR: &str = "data-product-id";

/// Text of the total line
pub fn total_label(total: Money) -> String {
    format!("Total: {}", total.display())
}

/// Full markup of the rack for the current cart
pub fn render(cart: &Cart) -> String {
    let mut cards = String::new();
    for product in cart.catalog().iter() {
        render_card(&mut cards, product, cart.is_selected(&product.key()));
    }

    format!(
        r#"<div class="checkout-rack"><h2>{heading}</h2><div class="products-grid">{cards}</div><div class="{total_class}">{total}</div><button type="button" class="{button_class}">{label}</button></div>"#,
        heading = HEADING,
        cards = cards,
        total_class = TOTAL_CLASS,
        total = escape(&total_label(cart.total())),
        button_class = CHECKOUT_BUTTON_CLASS,
        label = CHECKOUT_LABEL,
    )
}

fn render_card(out: &mut String, product: &Product, selected: bool) {
    let class = if selected {
        format!("{} {}", CARD_CLASS, SELECTED_CLASS)
    } else {
        CARD_CLASS.to_string()
    };
    let name = escape(&product.name);

    out.push_str(&format!(
        r#"<div class="{class}" {attr}="{key}"><img src="{src}" alt="{name}" class="product-image"><div class="product-name">{name}</div><div class="product-price">{price}</div></div>"#,
        class = class,
        attr = PRODUCT_ID_ATTR,
        key = escape(&product.key()),
        src = escape(&product.image_url),
        name = name,
        price = product.price.display(),
    ));
}
