//! Contact hand-off: clipboard write, then open the external profile.

use gloo_console as console;
use gloo_timers::future::TimeoutFuture;
use storefront_core::{ContactRequest, ContactStep, Error};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::dom;
use crate::notify;
use crate::state;

fn clipboard() -> Option<web_sys::Clipboard> {
    let navigator = dom::window().navigator();
    let raw = js_sys::Reflect::get(&navigator, &"clipboard".into()).ok()?;
    if raw.is_undefined() || raw.is_null() {
        return None;
    }
    raw.dyn_into().ok()
}

async fn write_clipboard(clipboard: &web_sys::Clipboard, text: &str) -> Result<(), Error> {
    JsFuture::from(clipboard.write_text(text))
        .await
        .map(|_| ())
        .map_err(|e| Error::Clipboard(format!("{e:?}")))
}

fn open_profile(url: &str) {
    if dom::window().open_with_url_and_target(url, "_blank").is_err() {
        console::warn!(format!("could not open {url}"));
    }
}

/// Run the hand-off. Never blocks the caller on failure.
pub async fn run(request: ContactRequest) {
    let cfg = state::config();
    let clipboard = clipboard();
    let mut step = request.first_step(clipboard.is_some());

    loop {
        match step {
            ContactStep::WriteClipboard => {
                let written = match &clipboard {
                    Some(cb) => match write_clipboard(cb, &request.message).await {
                        Ok(()) => true,
                        Err(e) => {
                            console::warn!(e.to_string());
                            false
                        }
                    },
                    None => false,
                };
                if written {
                    notify::show(storefront_core::contact::COPIED_NOTICE);
                }
                step = request.after_clipboard(written, cfg.contact_open_delay_ms);
            }
            ContactStep::OpenAfter { delay_ms } => {
                TimeoutFuture::new(delay_ms).await;
                open_profile(&request.url);
                return;
            }
            ContactStep::OpenNow => {
                open_profile(&request.url);
                return;
            }
            ContactStep::AlertThenOpen => {
                let _ = dom::window().alert_with_message(&request.message);
                open_profile(&request.url);
                return;
            }
        }
    }
}
