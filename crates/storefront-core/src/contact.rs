//! Contact hand-off: message formatting and the clipboard/new-tab decision.
//!
//! The browser shell executes the steps; deciding them is kept here so the
//! fallback order can be tested without a browser.

use std::fmt::Write as _;

use crate::cart::Cart;
use crate::product::Product;

pub const COPIED_NOTICE: &str = "Order details copied! Paste them in the chat.";

/// Human-readable order summary; `None` for an empty cart.
///
/// Quantities are shown only for lines with more than one unit.
pub fn order_summary(cart: &Cart, symbol: &str) -> Option<String> {
    if cart.is_empty() {
        return None;
    }
    let mut out = String::from("Hello! I'd like to place an order:\n\n");
    for (n, line) in cart.lines().iter().enumerate() {
        let qty = if line.quantity > 1 {
            format!(" x{}", line.quantity)
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "{}. {}{} - {}",
            n + 1,
            line.product.name,
            qty,
            line.subtotal().label(symbol)
        );
    }
    let _ = write!(out, "\nTotal: {}", cart.total().label(symbol));
    Some(out)
}

pub fn enquiry_message(product: &Product, symbol: &str) -> String {
    format!(
        "Hello! I'm interested in {} ({}).",
        product.name,
        product.price.label(symbol)
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStep {
    WriteClipboard,
    OpenAfter { delay_ms: u32 },
    OpenNow,
    AlertThenOpen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRequest {
    pub message: String,
    pub url: String,
}

impl ContactRequest {
    pub fn new(message: String, url: impl Into<String>) -> Self {
        Self {
            message,
            url: url.into(),
        }
    }

    pub fn first_step(&self, clipboard_available: bool) -> ContactStep {
        if clipboard_available {
            ContactStep::WriteClipboard
        } else {
            ContactStep::AlertThenOpen
        }
    }

    /// A rejected write still opens the profile, just without the pause.
    pub fn after_clipboard(&self, written: bool, delay_ms: u32) -> ContactStep {
        if written {
            ContactStep::OpenAfter { delay_ms }
        } else {
            ContactStep::OpenNow
        }
    }
}
