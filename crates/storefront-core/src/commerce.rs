//! Commerce state controller.
//!
//! Owns the cart, the wishlist and the modal states. Product data is only
//! ever pulled through a [`CatalogReader`]; the controller keeps a local
//! snapshot and refreshes it when a lookup cannot be satisfied.

use crate::cart::{Cart, QuantityChange};
use crate::catalog::CatalogReader;
use crate::contact::{self, ContactRequest};
use crate::error::{Error, Result};
use crate::modal::{ModalKind, Modals};
use crate::product::{Price, Product, ProductId};
use crate::wishlist::Wishlist;

/// Transient confirmations shown after a mutation.
pub mod notice {
    pub const ADDED_TO_CART: &str = "Item added to cart!";
    pub const REMOVED_FROM_CART: &str = "Item removed from cart!";
    pub const ADDED_TO_WISHLIST: &str = "Added to wishlist!";
    pub const REMOVED_FROM_WISHLIST: &str = "Removed from wishlist!";
    pub const MOVED_FROM_WISHLIST: &str = "Item added to cart from wishlist!";
    pub const ORDER_PLACED: &str = "Thank you! Your order has been placed.";
}

/// Badge values and totals derived from the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    pub cart_items: u32,
    pub cart_total: Price,
    pub wishlist_items: usize,
}

pub struct Commerce {
    catalog: CatalogReader,
    snapshot: Vec<Product>,
    cart: Cart,
    wishlist: Wishlist,
    modals: Modals,
    currency: String,
    contact_url: String,
    /// Units handed to the contact action by the checkout in flight.
    ordered: Option<Vec<(ProductId, u32)>>,
}

impl Commerce {
    pub fn new(catalog: CatalogReader, currency: impl Into<String>, contact_url: impl Into<String>) -> Self {
        Self {
            snapshot: catalog.products(),
            catalog,
            cart: Cart::new(),
            wishlist: Wishlist::new(),
            modals: Modals::default(),
            currency: currency.into(),
            contact_url: contact_url.into(),
            ordered: None,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub fn modals(&self) -> &Modals {
        &self.modals
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// True while the loader has not settled; callers may await readiness and retry.
    pub fn catalog_pending(&self) -> bool {
        self.catalog.is_pending()
    }

    pub fn catalog(&self) -> &CatalogReader {
        &self.catalog
    }

    pub fn totals(&self) -> Totals {
        Totals {
            cart_items: self.cart.item_count(),
            cart_total: self.cart.total(),
            wishlist_items: self.wishlist.len(),
        }
    }

    fn lookup(&mut self, id: ProductId) -> Result<Product> {
        if let Some(p) = self.snapshot.iter().find(|p| p.id == id) {
            return Ok(p.clone());
        }
        // Stale or empty snapshot: re-query the loader once.
        self.snapshot = self.catalog.products();
        self.snapshot
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| {
                tracing::debug!(%id, "product lookup missed");
                Error::LookupMiss(id)
            })
    }

    /// Returns the line's new quantity.
    pub fn add_to_cart(&mut self, id: ProductId) -> Result<u32> {
        let product = self.lookup(id)?;
        let qty = self.cart.add(&product);
        tracing::debug!(%id, qty, "added to cart");
        Ok(qty)
    }

    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        self.cart.remove(id)
    }

    pub fn change_quantity(&mut self, id: ProductId, delta: i32) -> QuantityChange {
        self.cart.change_quantity(id, delta)
    }

    /// Returns whether the product is wishlisted afterwards.
    pub fn toggle_wishlist(&mut self, id: ProductId) -> Result<bool> {
        if self.wishlist.contains(id) {
            self.wishlist.remove(id);
            return Ok(false);
        }
        let product = self.lookup(id)?;
        Ok(self.wishlist.toggle(&product))
    }

    pub fn remove_from_wishlist(&mut self, id: ProductId) -> bool {
        self.wishlist.remove(id)
    }

    /// Wishlist membership is kept after the move.
    pub fn add_to_cart_from_wishlist(&mut self, id: ProductId) -> Result<u32> {
        match self.wishlist.get(id).cloned() {
            Some(product) => Ok(self.cart.add(&product)),
            None => self.add_to_cart(id),
        }
    }

    pub fn open(&mut self, kind: ModalKind) {
        self.modals.open(kind);
    }

    pub fn close(&mut self, kind: ModalKind) -> bool {
        self.modals.close(kind)
    }

    pub fn close_all(&mut self) -> Vec<ModalKind> {
        self.modals.close_all()
    }

    /// Contact request for the current cart, `None` when the cart is empty
    /// or a checkout is already in flight. The cart is left intact until
    /// [`Commerce::finish_checkout`].
    pub fn checkout(&mut self) -> Option<ContactRequest> {
        if self.ordered.is_some() {
            return None;
        }
        let message = contact::order_summary(&self.cart, &self.currency)?;
        self.ordered = Some(
            self.cart
                .lines()
                .iter()
                .map(|l| (l.id(), l.quantity))
                .collect(),
        );
        Some(ContactRequest::new(message, self.contact_url.clone()))
    }

    pub fn checkout_in_flight(&self) -> bool {
        self.ordered.is_some()
    }

    /// Take the ordered units out of the cart and close it. Anything added
    /// after [`Commerce::checkout`] stays.
    pub fn finish_checkout(&mut self) {
        let Some(ordered) = self.ordered.take() else {
            return;
        };
        for (id, quantity) in ordered {
            let delta = i32::try_from(quantity).unwrap_or(i32::MAX);
            self.cart.change_quantity(id, -delta);
        }
        self.modals.close(ModalKind::Cart);
    }

    /// Single-product message; cart state is untouched.
    pub fn enquire(&mut self, id: ProductId) -> Result<ContactRequest> {
        let product = self.lookup(id)?;
        let message = contact::enquiry_message(&product, &self.currency);
        Ok(ContactRequest::new(message, self.contact_url.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, CatalogPublisher};

    const DOC: &str = r#"{"products":[
        {"id":1,"name":"A","price":100,"image":"a.jpg"},
        {"id":2,"name":"B","price":50,"image":"b.jpg"}
    ]}"#;

    fn loaded() -> (CatalogPublisher, Commerce) {
        let (publisher, reader) = catalog::channel();
        publisher.publish(catalog::parse_document(DOC).unwrap());
        let commerce = Commerce::new(reader, "₹", "https://example.com/store");
        (publisher, commerce)
    }

    fn id(n: i64) -> ProductId {
        ProductId::new(n)
    }

    #[test]
    fn scenario_two_products() -> anyhow::Result<()> {
        let (_publisher, mut commerce) = loaded();
        commerce.add_to_cart(id(1))?;
        commerce.add_to_cart(id(1))?;
        commerce.add_to_cart(id(2))?;

        let lines: Vec<(i64, u32, String)> = commerce
            .cart()
            .lines()
            .iter()
            .map(|l| (l.id().get(), l.quantity, l.subtotal().label("")))
            .collect();
        assert_eq!(
            lines,
            vec![(1, 2, "200.00".to_owned()), (2, 1, "50.00".to_owned())]
        );
        assert_eq!(commerce.totals().cart_total.label(""), "250.00");
        assert_eq!(commerce.totals().cart_items, 3);
        Ok(())
    }

    #[test]
    fn controller_created_before_load_refreshes_snapshot() -> anyhow::Result<()> {
        let (publisher, reader) = catalog::channel();
        let mut commerce = Commerce::new(reader, "₹", "https://example.com/store");
        assert!(commerce.catalog_pending());
        assert!(matches!(commerce.add_to_cart(id(1)), Err(Error::LookupMiss(_))));

        publisher.publish(catalog::parse_document(DOC)?);
        assert!(!commerce.catalog_pending());
        assert_eq!(commerce.add_to_cart(id(1))?, 1);
        Ok(())
    }

    #[test]
    fn failed_load_makes_add_a_no_op() {
        let (publisher, reader) = catalog::channel();
        publisher.fail();
        let mut commerce = Commerce::new(reader, "₹", "https://example.com/store");
        for n in [1, 2, 99] {
            assert!(matches!(commerce.add_to_cart(id(n)), Err(Error::LookupMiss(_))));
        }
        assert!(commerce.cart().is_empty());
        assert!(commerce.catalog().products().is_empty());
    }

    #[test]
    fn unknown_id_does_not_mutate() {
        let (_publisher, mut commerce) = loaded();
        commerce.add_to_cart(id(1)).unwrap();
        assert!(commerce.add_to_cart(id(42)).is_err());
        assert!(commerce.toggle_wishlist(id(42)).is_err());
        assert_eq!(commerce.cart().len(), 1);
        assert!(commerce.wishlist().is_empty());
    }

    #[test]
    fn decrement_last_unit_removes_line() -> anyhow::Result<()> {
        let (_publisher, mut commerce) = loaded();
        commerce.add_to_cart(id(1))?;
        commerce.add_to_cart(id(2))?;
        assert_eq!(commerce.change_quantity(id(2), -1), QuantityChange::Removed);
        assert_eq!(commerce.cart().len(), 1);
        assert_eq!(commerce.change_quantity(id(1), 2), QuantityChange::Updated(3));
        assert_eq!(commerce.totals().cart_total.label("₹"), "₹300.00");
        Ok(())
    }

    #[test]
    fn wishlist_toggle_is_an_involution() -> anyhow::Result<()> {
        let (_publisher, mut commerce) = loaded();
        assert!(commerce.toggle_wishlist(id(2))?);
        assert_eq!(commerce.totals().wishlist_items, 1);
        assert!(!commerce.toggle_wishlist(id(2))?);
        assert!(commerce.wishlist().is_empty());
        Ok(())
    }

    #[test]
    fn moving_to_cart_keeps_wishlist_membership() -> anyhow::Result<()> {
        let (_publisher, mut commerce) = loaded();
        commerce.toggle_wishlist(id(1))?;
        assert_eq!(commerce.add_to_cart_from_wishlist(id(1))?, 1);
        assert!(commerce.wishlist().contains(id(1)));
        assert_eq!(commerce.cart().item_count(), 1);
        Ok(())
    }

    #[test]
    fn checkout_formats_summary_then_clears() -> anyhow::Result<()> {
        let (_publisher, mut commerce) = loaded();
        assert!(commerce.checkout().is_none());

        commerce.add_to_cart(id(1))?;
        commerce.add_to_cart(id(1))?;
        commerce.add_to_cart(id(2))?;
        commerce.open(ModalKind::Cart);

        let request = commerce.checkout().expect("non-empty cart");
        assert!(request.message.contains("A x2 - ₹200.00"));
        assert!(request.message.contains("B - ₹50.00"));
        assert!(!request.message.contains("B x1"));
        assert!(request.message.ends_with("Total: ₹250.00"));
        assert_eq!(request.url, "https://example.com/store");
        assert_eq!(commerce.cart().len(), 2);

        commerce.finish_checkout();
        assert!(commerce.cart().is_empty());
        assert!(!commerce.modals().is_open(ModalKind::Cart));
        Ok(())
    }

    #[test]
    fn items_added_during_checkout_survive() -> anyhow::Result<()> {
        let (_publisher, mut commerce) = loaded();
        commerce.add_to_cart(id(1))?;
        let request = commerce.checkout().expect("non-empty cart");
        assert!(!request.message.contains("B"));

        commerce.add_to_cart(id(2))?;
        commerce.add_to_cart(id(1))?;
        commerce.finish_checkout();

        let left: Vec<(i64, u32)> = commerce
            .cart()
            .lines()
            .iter()
            .map(|l| (l.id().get(), l.quantity))
            .collect();
        assert_eq!(left, vec![(1, 1), (2, 1)]);
        Ok(())
    }

    #[test]
    fn second_checkout_waits_for_the_first() -> anyhow::Result<()> {
        let (_publisher, mut commerce) = loaded();
        commerce.add_to_cart(id(1))?;
        assert!(commerce.checkout().is_some());
        assert!(commerce.checkout_in_flight());
        assert!(commerce.checkout().is_none());

        commerce.finish_checkout();
        assert!(!commerce.checkout_in_flight());
        assert!(commerce.cart().is_empty());

        commerce.add_to_cart(id(2))?;
        assert!(commerce.checkout().is_some());
        Ok(())
    }

    #[test]
    fn finishing_without_checkout_keeps_cart() -> anyhow::Result<()> {
        let (_publisher, mut commerce) = loaded();
        commerce.add_to_cart(id(1))?;
        commerce.finish_checkout();
        assert_eq!(commerce.cart().len(), 1);
        Ok(())
    }

    #[test]
    fn decrement_to_zero_reports_removal_notice() -> anyhow::Result<()> {
        let (_publisher, mut commerce) = loaded();
        commerce.add_to_cart(id(1))?;
        commerce.add_to_cart(id(1))?;
        assert_eq!(commerce.change_quantity(id(1), -1).notice(), None);
        let change = commerce.change_quantity(id(1), -1);
        assert_eq!(change, QuantityChange::Removed);
        assert_eq!(change.notice(), Some(notice::REMOVED_FROM_CART));
        assert!(commerce.cart().is_empty());
        Ok(())
    }

    #[test]
    fn enquire_leaves_cart_alone() -> anyhow::Result<()> {
        let (_publisher, mut commerce) = loaded();
        let request = commerce.enquire(id(2))?;
        assert_eq!(request.message, "Hello! I'm interested in B (₹50.00).");
        assert!(commerce.cart().is_empty());
        Ok(())
    }

    #[test]
    fn closing_modals_keeps_state() -> anyhow::Result<()> {
        let (_publisher, mut commerce) = loaded();
        commerce.add_to_cart(id(1))?;
        commerce.open(ModalKind::Cart);
        commerce.open(ModalKind::Wishlist);
        assert_eq!(commerce.close_all().len(), 2);
        assert_eq!(commerce.cart().len(), 1);
        Ok(())
    }
}
