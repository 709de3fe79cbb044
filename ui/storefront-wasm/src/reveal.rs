//! One-shot reveal of catalog cards as they scroll into view.

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;

const THRESHOLD: f64 = 0.1;
const ROOT_MARGIN: &str = "0px 0px -50px 0px";

fn show(el: &Element) {
    dom::set_style(el, "opacity", "1");
    dom::set_style(el, "transform", "translateY(0)");
}

/// Observe every element matching `selector` under `root`. Each becomes
/// visible once it crosses the threshold and is then unobserved.
pub fn observe_all(root: &Element, selector: &str) {
    let targets = dom::query_all_within(root, selector);
    if targets.is_empty() {
        return;
    }

    let cb = Closure::wrap(Box::new(|entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if entry.is_intersecting() {
                let target = entry.target();
                show(&target);
                observer.unobserve(&target);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let opts = IntersectionObserverInit::new();
    opts.set_threshold(&JsValue::from_f64(THRESHOLD));
    opts.set_root_margin(ROOT_MARGIN);

    match IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &opts) {
        Ok(observer) => {
            for el in &targets {
                observer.observe(el);
            }
            cb.forget();
        }
        // No IntersectionObserver support: never leave cards hidden.
        Err(_) => targets.iter().for_each(show),
    }
}
