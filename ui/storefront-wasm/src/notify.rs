//! Transient toast notifications.
//!
//! At most one `.notification` element exists; a new message replaces the
//! current one. Each toast fades out and removes itself after the configured
//! duration.

use gloo_timers::future::TimeoutFuture;

use crate::dom;
use crate::state;

const TOAST_STYLE: &str = "position: fixed; top: 90px; right: 20px; \
    background: var(--color-primary); color: var(--color-secondary); \
    padding: 15px 25px; border-radius: 8px; box-shadow: 0 4px 20px rgba(0, 0, 0, 0.2); \
    z-index: 10000; animation: slideDown 0.3s ease-out; \
    border: 2px solid var(--color-accent); font-weight: 600; font-size: 1.4rem;";

pub fn show(message: &str) {
    if let Some(existing) = dom::query(".notification") {
        existing.remove();
    }

    let Ok(toast) = dom::create_element("div") else {
        return;
    };
    toast.set_class_name("notification");
    dom::set_text(&toast, message);
    let _ = toast.set_attribute("style", TOAST_STYLE);
    if dom::body().append_child(&toast).is_err() {
        return;
    }

    let cfg = state::config();
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(cfg.notice_ms).await;
        let fade = format!("fadeOut {}ms ease-out", cfg.notice_fade_ms);
        dom::set_style(&toast, "animation", &fade);
        TimeoutFuture::new(cfg.notice_fade_ms).await;
        toast.remove();
    });
}
