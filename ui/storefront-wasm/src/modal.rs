//! Modal open/close with body scroll lock.

use storefront_core::ModalKind;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::commerce;
use crate::dom::{self, Elements};
use crate::state;

pub fn open(els: &Elements, kind: ModalKind) {
    let Some(modal) = els.modal(kind) else {
        return;
    };
    state::with_mut(|c| c.open(kind));
    match kind {
        ModalKind::Cart => commerce::render_cart(els),
        ModalKind::Wishlist => commerce::render_wishlist(els),
    }
    dom::add_class(modal, "active");
    dom::set_style(&dom::body(), "overflow", "hidden");
    // Force a layout pass so the transition starts from the hidden state.
    if let Some(html) = modal.dyn_ref::<HtmlElement>() {
        let _ = html.offset_height();
    }
}

pub fn close(els: &Elements, kind: ModalKind) {
    state::with_mut(|c| c.close(kind));
    if let Some(modal) = els.modal(kind) {
        dom::remove_class(modal, "active");
    }
    release_scroll();
}

pub fn close_all(els: &Elements) {
    for kind in state::with_mut(|c| c.close_all()).unwrap_or_default() {
        if let Some(modal) = els.modal(kind) {
            dom::remove_class(modal, "active");
        }
    }
    release_scroll();
}

fn release_scroll() {
    if !state::with(|c| c.modals().any_open()).unwrap_or(false) {
        let _ = dom::body().style().remove_property("overflow");
    }
}

/// Modal an element belongs to, via its enclosing overlay.
pub fn owning_modal(el: &web_sys::Element) -> Option<ModalKind> {
    let overlay = dom::closest(el, ".modal-overlay")?;
    ModalKind::from_element_id(&overlay.id())
}
