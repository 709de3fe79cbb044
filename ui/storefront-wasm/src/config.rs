//! Page config loading.
//!
//! Reads `<script type="application/json" id="storefrontConfig">` when the
//! page provides one.

use storefront_core::StoreConfig;

use crate::dom;

pub const CONFIG_ELEMENT_ID: &str = "storefrontConfig";

pub fn load() -> StoreConfig {
    let raw = dom::by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    StoreConfig::from_json(&raw)
}
