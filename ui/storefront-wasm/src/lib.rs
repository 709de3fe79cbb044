//! Storefront WASM frontend.
//!
//! Loads the catalog, renders product cards and drives the cart, wishlist
//! and contact hand-off from browser events. Domain state lives in
//! `storefront-core`; this crate only touches the DOM.

pub mod api;
pub mod catalog;
pub mod commerce;
pub mod config;
pub mod contact;
pub mod dom;
pub mod events;
pub mod modal;
pub mod notify;
pub mod reveal;
pub mod state;

use gloo_console as console;
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let cfg = config::load();
    let (publisher, _reader) = storefront_core::catalog::channel();
    state::install(cfg.clone(), publisher);

    let els = dom::Elements::bind();
    events::bind_events(&els);
    commerce::render_cart(&els);
    commerce::render_wishlist(&els);

    // Cards may arrive before or after the grid listener; both wait on the
    // grid independently.
    wasm_bindgen_futures::spawn_local(commerce::attach_catalog(els));
    catalog::load_catalog(&cfg).await;

    console::log!("storefront ready");
    Ok(())
}

/// Current catalog snapshot, empty while loading or after a failure.
#[wasm_bindgen(js_name = getProducts)]
pub fn get_products() -> Result<JsValue, JsValue> {
    let products = state::reader().map(|r| r.products()).unwrap_or_default();
    serde_wasm_bindgen::to_value(&products).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Fetch and render the catalog again, replacing the grid content.
/// Re-attaches the card listener if an earlier attempt gave up.
#[wasm_bindgen(js_name = reloadCatalog)]
pub async fn reload_catalog() {
    let cfg = state::config();
    wasm_bindgen_futures::spawn_local(commerce::attach_catalog(dom::Elements::bind()));
    catalog::load_catalog(&cfg).await;
}
