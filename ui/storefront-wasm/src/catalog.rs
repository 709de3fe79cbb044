//! Catalog loader and renderer.
//!
//! Fetches the product document once, publishes the snapshot to the catalog
//! channel, renders the grid and announces completion. Re-running replaces
//! the grid content.

use gloo_console as console;
use storefront_core::view::{self, CardControls};
use storefront_core::{Error, Product, StoreConfig, catalog};
use web_sys::Element;

use crate::api;
use crate::dom;
use crate::reveal;
use crate::state;

pub const GRID_ID: &str = "productGrid";

pub async fn load_catalog(cfg: &StoreConfig) {
    let result = api::fetch_text(&cfg.catalog_url)
        .await
        .and_then(|body| catalog::parse_document(&body));
    let grid = dom::wait_for_element(GRID_ID, cfg.container_poll_ms, cfg.container_poll_attempts).await;

    match result {
        Ok(products) => {
            state::with_publisher(|p| p.publish(products.clone()));
            let Some(grid) = grid else {
                console::warn!(Error::MissingElement(GRID_ID.to_owned()).to_string());
                return;
            };
            match render(&grid, &products, cfg) {
                Ok(()) => {
                    state::with_publisher(|p| p.rendered());
                }
                Err(e) => {
                    console::error!(format!("Error rendering products: {e}"));
                    dom::set_inner_html(&grid, view::LOAD_ERROR_HTML);
                }
            }
        }
        Err(e) => {
            console::error!(format!("Error loading products: {e}"));
            state::with_publisher(|p| p.fail());
            if let Some(grid) = grid {
                dom::set_inner_html(&grid, view::LOAD_ERROR_HTML);
            }
        }
    }
}

fn render(grid: &Element, products: &[Product], cfg: &StoreConfig) -> Result<(), Error> {
    let controls = if cfg.enquire_only {
        CardControls::Enquire
    } else {
        CardControls::CartAndWishlist
    };
    let html = view::catalog_html(products, &cfg.currency_symbol, controls)?;
    dom::set_inner_html(grid, &html);
    reveal::observe_all(grid, ".card");
    Ok(())
}
