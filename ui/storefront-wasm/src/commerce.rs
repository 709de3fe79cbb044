//! Cart and wishlist UI.
//!
//! Card buttons are handled by one delegated listener on the product grid,
//! so re-rendering the grid never duplicates handlers. Modal lists use the
//! same approach with `data-action` attributes.

use futures::future::{self, Either};
use gloo_console as console;
use gloo_timers::future::TimeoutFuture;
use storefront_core::commerce::notice;
use storefront_core::view::{self, CART_BUTTON, ENQUIRE_BUTTON, WISHLIST_BUTTON, WishlistIndicator};
use storefront_core::{CatalogEvent, CatalogStatus, Error, ModalKind, ProductId, QuantityChange};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::catalog::GRID_ID;
use crate::contact;
use crate::dom::{self, Elements};
use crate::modal;
use crate::notify;
use crate::state;

// ── Catalog binding ──

/// Attach the delegated card listener once the grid exists, and keep card
/// hearts in sync with the wishlist after every catalog render.
pub async fn attach_catalog(els: Elements) {
    if !state::claim_catalog_binding() {
        return;
    }
    // Subscribe before waiting so a render that lands meanwhile is seen.
    let Some(mut events) = state::reader().map(|r| r.subscribe()) else {
        state::release_catalog_binding();
        return;
    };
    let cfg = state::config();
    let Some(grid) = dom::wait_for_element(GRID_ID, cfg.container_poll_ms, cfg.container_poll_attempts).await else {
        console::warn!(Error::MissingElement(GRID_ID.to_owned()).to_string());
        state::release_catalog_binding();
        return;
    };

    let cb = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
        on_card_click(&els, &event);
    }) as Box<dyn FnMut(_)>);
    if grid
        .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
        .is_err()
    {
        state::release_catalog_binding();
        return;
    }
    cb.forget();

    sync_wishlist_indicators(&grid);
    while let Some(event) = events.next().await {
        if event == CatalogEvent::Rendered {
            sync_wishlist_indicators(&grid);
        }
    }
}

fn on_card_click(els: &Elements, event: &web_sys::MouseEvent) {
    let Some(target) = dom::event_element(event) else {
        return;
    };
    let selector = format!(".{CART_BUTTON}, .{WISHLIST_BUTTON}, .{ENQUIRE_BUTTON}");
    let Some(button) = dom::closest(&target, &selector) else {
        return;
    };
    let Some(id) = dom::product_id(&button) else {
        console::warn!("card button without a product id");
        return;
    };
    event.prevent_default();
    press(&button);

    let class_list = button.class_list();
    if class_list.contains(CART_BUTTON) {
        let els = els.clone();
        wasm_bindgen_futures::spawn_local(async move {
            add_to_cart(&els, id).await;
        });
    } else if class_list.contains(WISHLIST_BUTTON) {
        toggle_wishlist(els, id, &button);
    } else {
        enquire(id);
    }
}

/// Brief scale-down on press.
fn press(button: &Element) {
    dom::set_style(button, "transform", "scale(0.95)");
    let button = button.clone();
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(150).await;
        dom::set_style(&button, "transform", "scale(1)");
    });
}

// ── Cart ──

async fn add_to_cart(els: &Elements, id: ProductId) {
    let result = match state::with_mut(|c| c.add_to_cart(id)) {
        Some(Err(Error::LookupMiss(_))) if catalog_pending() => {
            // The click raced the fetch; retry once the catalog settles.
            if !wait_for_catalog().await {
                console::warn!(format!("catalog not ready; product {id} was not added"));
                return;
            }
            state::with_mut(|c| c.add_to_cart(id))
        }
        other => other,
    };
    match result {
        Some(Ok(_)) => {
            render_cart(els);
            notify::show(notice::ADDED_TO_CART);
        }
        Some(Err(e)) => console::error!(e.to_string()),
        None => {}
    }
}

fn catalog_pending() -> bool {
    state::with(|c| c.catalog_pending()).unwrap_or(false)
}

/// Wait for the catalog to leave `Pending`, bounded by `catalog_wait_ms`.
async fn wait_for_catalog() -> bool {
    let Some(reader) = state::reader() else {
        return false;
    };
    let wait_ms = state::config().catalog_wait_ms;
    let ready = Box::pin(reader.ready());
    match future::select(ready, TimeoutFuture::new(wait_ms)).await {
        Either::Left((CatalogStatus::Loaded(_), _)) => true,
        Either::Left(_) | Either::Right(_) => false,
    }
}

pub fn render_cart(els: &Elements) {
    let Some((html, totals, symbol)) = state::with(|c| {
        (
            view::cart_html(c.cart(), c.currency()),
            c.totals(),
            c.currency().to_string(),
        )
    }) else {
        return;
    };
    if let Some(badge) = &els.cart_count {
        dom::set_text(badge, &totals.cart_items.to_string());
        dom::toggle_class(badge, "active", totals.cart_items > 0);
    }
    if let Some(list) = &els.cart_items {
        match html {
            Ok(html) => dom::set_inner_html(list, &html),
            Err(e) => console::error!(e.to_string()),
        }
    }
    if let Some(total) = &els.cart_total {
        dom::set_text(total, &totals.cart_total.label(&symbol));
    }
}

/// Delegated handler for the quantity and remove buttons in the cart modal.
pub fn bind_cart_list(els: &Elements) {
    let Some(list) = els.cart_items.clone() else {
        return;
    };
    let els = els.clone();
    let cb = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
        let Some((action, id)) = action_target(&event) else {
            return;
        };
        match action.as_str() {
            "increment" | "decrement" => {
                let delta = if action == "increment" { 1 } else { -1 };
                let Some(change) = state::with_mut(|c| c.change_quantity(id, delta)) else {
                    return;
                };
                if change == QuantityChange::Missing {
                    return;
                }
                render_cart(&els);
                if let Some(message) = change.notice() {
                    notify::show(message);
                }
            }
            "remove" => {
                if state::with_mut(|c| c.remove_from_cart(id)).unwrap_or(false) {
                    render_cart(&els);
                    notify::show(notice::REMOVED_FROM_CART);
                }
            }
            _ => {}
        }
    }) as Box<dyn FnMut(_)>);
    let _ = list.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
    cb.forget();
}

fn action_target(event: &web_sys::MouseEvent) -> Option<(String, ProductId)> {
    let target = dom::event_element(event)?;
    let button = dom::closest(&target, "[data-action]")?;
    let action = button.get_attribute("data-action")?;
    let id = dom::product_id(&button)?;
    Some((action, id))
}

/// Hand the order to the contact channel, then clear the cart.
pub async fn checkout(els: &Elements) {
    let Some(request) = state::with_mut(|c| c.checkout()).flatten() else {
        return;
    };
    contact::run(request).await;
    notify::show(notice::ORDER_PLACED);

    TimeoutFuture::new(state::config().checkout_close_ms).await;
    state::with_mut(|c| c.finish_checkout());
    render_cart(els);
    modal::close(els, ModalKind::Cart);
}

// ── Wishlist ──

fn toggle_wishlist(els: &Elements, id: ProductId, button: &Element) {
    match state::with_mut(|c| c.toggle_wishlist(id)) {
        Some(Ok(wishlisted)) => {
            set_heart(button, wishlisted);
            render_wishlist(els);
            notify::show(if wishlisted {
                notice::ADDED_TO_WISHLIST
            } else {
                notice::REMOVED_FROM_WISHLIST
            });
        }
        Some(Err(e)) => console::error!(e.to_string()),
        None => {}
    }
}

fn set_heart(button: &Element, wishlisted: bool) {
    let indicator = WishlistIndicator::for_state(wishlisted);
    if let Ok(Some(icon)) = button.query_selector("ion-icon") {
        let _ = icon.set_attribute("name", indicator.icon);
    }
    dom::set_style(button, "color", indicator.color);
}

/// Reflect wishlist membership on every card heart under `root`.
fn sync_wishlist_indicators(root: &Element) {
    for button in dom::query_all_within(root, &format!(".{WISHLIST_BUTTON}")) {
        let Some(id) = dom::product_id(&button) else {
            continue;
        };
        let wishlisted = state::with(|c| c.wishlist().contains(id)).unwrap_or(false);
        set_heart(&button, wishlisted);
    }
}

fn sync_card_heart(id: ProductId) {
    if let Some(grid) = dom::by_id(GRID_ID) {
        let selector = format!(".{WISHLIST_BUTTON}[data-product-id=\"{id}\"]");
        if let Ok(Some(button)) = grid.query_selector(&selector) {
            let wishlisted = state::with(|c| c.wishlist().contains(id)).unwrap_or(false);
            set_heart(&button, wishlisted);
        }
    }
}

pub fn render_wishlist(els: &Elements) {
    let Some((html, count)) = state::with(|c| {
        (view::wishlist_html(c.wishlist(), c.currency()), c.wishlist().len())
    }) else {
        return;
    };
    if let Some(badge) = &els.wishlist_count {
        dom::set_text(badge, &count.to_string());
        dom::toggle_class(badge, "active", count > 0);
    }
    if let Some(list) = &els.wishlist_items {
        match html {
            Ok(html) => dom::set_inner_html(list, &html),
            Err(e) => console::error!(e.to_string()),
        }
    }
}

/// Delegated handler for the wishlist modal buttons.
pub fn bind_wishlist_list(els: &Elements) {
    let Some(list) = els.wishlist_items.clone() else {
        return;
    };
    let els = els.clone();
    let cb = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
        let Some((action, id)) = action_target(&event) else {
            return;
        };
        match action.as_str() {
            "unwish" => {
                if state::with_mut(|c| c.remove_from_wishlist(id)).unwrap_or(false) {
                    render_wishlist(&els);
                    sync_card_heart(id);
                    notify::show(notice::REMOVED_FROM_WISHLIST);
                }
            }
            "move-to-cart" => match state::with_mut(|c| c.add_to_cart_from_wishlist(id)) {
                Some(Ok(_)) => {
                    render_cart(&els);
                    notify::show(notice::MOVED_FROM_WISHLIST);
                }
                Some(Err(e)) => console::error!(e.to_string()),
                None => {}
            },
            _ => {}
        }
    }) as Box<dyn FnMut(_)>);
    let _ = list.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
    cb.forget();
}

// ── Enquire ──

fn enquire(id: ProductId) {
    match state::with_mut(|c| c.enquire(id)) {
        Some(Ok(request)) => wasm_bindgen_futures::spawn_local(contact::run(request)),
        Some(Err(e)) => console::error!(e.to_string()),
        None => {}
    }
}
