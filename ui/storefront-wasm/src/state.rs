//! Global application state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! The commerce controller, the catalog publisher and the page config live
//! here; handlers borrow them for the duration of one synchronous mutation
//! and never across an `.await`.

use std::cell::{Cell, RefCell};

use storefront_core::{CatalogPublisher, CatalogReader, Commerce, StoreConfig};

thread_local! {
    static CONFIG: RefCell<StoreConfig> = RefCell::new(StoreConfig::default());
    static COMMERCE: RefCell<Option<Commerce>> = const { RefCell::new(None) };
    static PUBLISHER: RefCell<Option<CatalogPublisher>> = const { RefCell::new(None) };
    static CATALOG_BOUND: Cell<bool> = const { Cell::new(false) };
}

/// Install the config, the catalog channel and a fresh controller.
pub fn install(config: StoreConfig, publisher: CatalogPublisher) {
    let commerce = Commerce::new(
        publisher.reader(),
        config.currency_symbol.clone(),
        config.contact_url.clone(),
    );
    CONFIG.with(|c| *c.borrow_mut() = config);
    COMMERCE.with(|c| *c.borrow_mut() = Some(commerce));
    PUBLISHER.with(|p| *p.borrow_mut() = Some(publisher));
}

pub fn config() -> StoreConfig {
    CONFIG.with(|c| c.borrow().clone())
}

/// Run a closure with shared access to the controller.
pub fn with<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&Commerce) -> R,
{
    COMMERCE.with(|c| c.borrow().as_ref().map(f))
}

/// Run a closure with mutable access to the controller.
pub fn with_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut Commerce) -> R,
{
    COMMERCE.with(|c| c.borrow_mut().as_mut().map(f))
}

pub fn with_publisher<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&CatalogPublisher) -> R,
{
    PUBLISHER.with(|p| p.borrow().as_ref().map(f))
}

pub fn reader() -> Option<CatalogReader> {
    with(|c| c.catalog().clone())
}

/// First caller wins; later callers must not bind the catalog listener again.
pub fn claim_catalog_binding() -> bool {
    CATALOG_BOUND.with(|b| !b.replace(true))
}

pub fn release_catalog_binding() {
    CATALOG_BOUND.with(|b| b.set(false));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_binding_is_claimed_once_until_released() {
        release_catalog_binding();
        assert!(claim_catalog_binding());
        assert!(!claim_catalog_binding());

        // A binding that gave up can be claimed again by a later reload.
        release_catalog_binding();
        assert!(claim_catalog_binding());
        release_catalog_binding();
    }

    #[test]
    fn install_starts_with_empty_commerce() {
        let (publisher, _reader) = storefront_core::catalog::channel();
        install(StoreConfig::default(), publisher);
        assert_eq!(with(|c| c.cart().is_empty()), Some(true));
        assert!(reader().is_some_and(|r| r.is_pending()));
        assert_eq!(config().currency_symbol, "₹");
    }
}
