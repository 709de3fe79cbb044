//! Event binding.
//!
//! Wires the page chrome: header buttons, modal close controls, checkout
//! and the Escape key. Card and list buttons are delegated in `commerce`.

use storefront_core::ModalKind;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::commerce;
use crate::dom::{self, Elements};
use crate::modal;

/// Attach a listener for the page lifetime.
macro_rules! listen {
    ($target:expr, $kind:expr, $ev:ty, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut($ev)>);
        if $target
            .add_event_listener_with_callback($kind, cb.as_ref().unchecked_ref())
            .is_ok()
        {
            cb.forget();
        }
    }};
}

/// Bind all chrome listeners. Call once after init.
pub fn bind_events(els: &Elements) {
    // ── Header ──
    if let Some(btn) = &els.cart_btn {
        let els2 = els.clone();
        listen!(btn, "click", web_sys::MouseEvent, move |event: web_sys::MouseEvent| {
            event.prevent_default();
            modal::open(&els2, ModalKind::Cart);
        });
    }
    if let Some(btn) = &els.wishlist_btn {
        let els2 = els.clone();
        listen!(btn, "click", web_sys::MouseEvent, move |event: web_sys::MouseEvent| {
            event.prevent_default();
            modal::open(&els2, ModalKind::Wishlist);
        });
    }

    // ── Modals ──
    for kind in ModalKind::ALL {
        if let Some(overlay) = els.modal(kind) {
            bind_overlay(els, overlay, kind);
        }
    }
    for close_btn in dom::query_all(".modal-close") {
        let els2 = els.clone();
        let btn = close_btn.clone();
        listen!(&close_btn, "click", web_sys::MouseEvent, move |_: web_sys::MouseEvent| {
            if let Some(kind) = modal::owning_modal(&btn) {
                modal::close(&els2, kind);
            }
        });
    }
    {
        let els2 = els.clone();
        listen!(&dom::window(), "keydown", web_sys::KeyboardEvent, move |event: web_sys::KeyboardEvent| {
            if event.key() == "Escape" {
                modal::close_all(&els2);
            }
        });
    }

    // ── Lists and checkout ──
    commerce::bind_cart_list(els);
    commerce::bind_wishlist_list(els);
    if let Some(btn) = &els.checkout_btn {
        let els2 = els.clone();
        listen!(btn, "click", web_sys::MouseEvent, move |_: web_sys::MouseEvent| {
            let els3 = els2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                commerce::checkout(&els3).await;
            });
        });
    }
}

/// Clicking the backdrop (not the dialog) closes the modal.
fn bind_overlay(els: &Elements, overlay: &Element, kind: ModalKind) {
    let els2 = els.clone();
    let overlay2 = overlay.clone();
    listen!(overlay, "click", web_sys::MouseEvent, move |event: web_sys::MouseEvent| {
        if dom::event_element(&event).as_ref() == Some(&overlay2) {
            modal::close(&els2, kind);
        }
    });
}
