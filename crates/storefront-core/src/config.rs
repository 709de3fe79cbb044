//! Page-level configuration.
//!
//! Read from an optional inline JSON block on the page; every field has a
//! default so a missing or partial block still yields a usable config.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// Static product document fetched once per page session.
    pub catalog_url: String,
    /// External profile opened by the contact action.
    pub contact_url: String,
    pub currency_symbol: String,
    /// Interval and cap for waiting on the catalog container element.
    pub container_poll_ms: u32,
    pub container_poll_attempts: u32,
    /// Upper bound on waiting for the catalog before an add-to-cart gives up.
    pub catalog_wait_ms: u32,
    /// Delay between the checkout hand-off and clearing the cart.
    pub checkout_close_ms: u32,
    pub notice_ms: u32,
    pub notice_fade_ms: u32,
    /// Delay between a successful clipboard write and opening the profile.
    pub contact_open_delay_ms: u32,
    /// Render a single "enquire" control instead of cart + wishlist controls.
    pub enquire_only: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            catalog_url: "/assets/data/products.json".to_owned(),
            contact_url: "https://www.instagram.com/".to_owned(),
            currency_symbol: "₹".to_owned(),
            container_poll_ms: 100,
            container_poll_attempts: 50,
            catalog_wait_ms: 5_000,
            checkout_close_ms: 1_500,
            notice_ms: 3_000,
            notice_fade_ms: 300,
            contact_open_delay_ms: 500,
            enquire_only: false,
        }
    }
}

impl StoreConfig {
    /// Parse an inline config block, falling back to defaults on bad input.
    pub fn from_json(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        serde_json::from_str(raw).unwrap_or_else(|err| {
            tracing::warn!(%err, "invalid storefront config, using defaults");
            Self::default()
        })
    }
}
