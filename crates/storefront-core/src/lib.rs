//! Storefront domain logic.
//!
//! Catalog parsing and readiness, cart and wishlist state, modal states and
//! contact-message formatting. Nothing here touches the DOM; the wasm shell
//! in `ui/storefront-wasm` drives it from browser events.

pub mod cart;
pub mod catalog;
pub mod commerce;
pub mod config;
pub mod contact;
pub mod error;
pub mod modal;
pub mod product;
pub mod view;
pub mod wishlist;

pub use cart::{Cart, CartLine, QuantityChange};
pub use catalog::{CatalogEvent, CatalogEvents, CatalogPublisher, CatalogReader, CatalogStatus};
pub use commerce::{Commerce, Totals};
pub use config::StoreConfig;
pub use contact::{ContactRequest, ContactStep};
pub use error::{Error, Result};
pub use modal::{ModalKind, ModalState, Modals};
pub use product::{Price, Product, ProductId};
pub use wishlist::Wishlist;
