//! DOM element bindings and small helpers.
//!
//! Page chrome (badges, modals, header buttons) is resolved once at startup.
//! Every field is optional: a page without a wishlist simply has no wishlist
//! UI, and the handlers skip it.

use gloo_timers::future::TimeoutFuture;
use storefront_core::ProductId;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

// ── Helpers ──

fn doc() -> Document {
    gloo_utils::document()
}

pub fn window() -> web_sys::Window {
    gloo_utils::window()
}

pub fn by_id(id: &str) -> Option<Element> {
    doc().get_element_by_id(id)
}

pub fn query(selector: &str) -> Option<Element> {
    doc().query_selector(selector).ok()?
}

pub fn query_all(selector: &str) -> Vec<Element> {
    collect(doc().query_selector_all(selector).ok())
}

/// Query all matching elements within a parent element.
pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    collect(parent.query_selector_all(selector).ok())
}

fn collect(list: Option<web_sys::NodeList>) -> Vec<Element> {
    let Some(nl) = list else {
        return Vec::new();
    };
    (0..nl.length())
        .filter_map(|i| nl.item(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn set_style(el: &Element, property: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    doc().create_element(tag)
}

pub fn body() -> HtmlElement {
    gloo_utils::body()
}

/// Element the event originated from, if it is an element at all.
pub fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

pub fn closest(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten()
}

pub fn product_id(el: &Element) -> Option<ProductId> {
    el.get_attribute("data-product-id")?.parse().ok()
}

/// Bounded poll for an element that may not exist yet.
pub async fn wait_for_element(id: &str, interval_ms: u32, attempts: u32) -> Option<Element> {
    for attempt in 0..=attempts {
        if let Some(el) = by_id(id) {
            return Some(el);
        }
        if attempt < attempts {
            TimeoutFuture::new(interval_ms).await;
        }
    }
    None
}

// ── Elements struct ──

/// Page chrome used by the commerce UI.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Header
    pub cart_btn: Option<Element>,
    pub wishlist_btn: Option<Element>,
    pub cart_count: Option<Element>,
    pub wishlist_count: Option<Element>,

    // Modals
    pub cart_modal: Option<Element>,
    pub wishlist_modal: Option<Element>,
    pub cart_items: Option<Element>,
    pub wishlist_items: Option<Element>,
    pub cart_total: Option<Element>,
    pub checkout_btn: Option<Element>,
}

impl Elements {
    /// Resolve page chrome. Call once the document has been parsed.
    pub fn bind() -> Elements {
        Elements {
            cart_btn: query(".cart-btn"),
            wishlist_btn: query(".wishlist-btn"),
            cart_count: query(".cart-count"),
            wishlist_count: query(".wishlist-count"),

            cart_modal: by_id("cartModal"),
            wishlist_modal: by_id("wishlistModal"),
            cart_items: by_id("cartItems"),
            wishlist_items: by_id("wishlistItems"),
            cart_total: by_id("cartTotal"),
            checkout_btn: query(".btn-checkout"),
        }
    }

    pub fn modal(&self, kind: storefront_core::ModalKind) -> Option<&Element> {
        match kind {
            storefront_core::ModalKind::Cart => self.cart_modal.as_ref(),
            storefront_core::ModalKind::Wishlist => self.wishlist_modal.as_ref(),
        }
    }
}
