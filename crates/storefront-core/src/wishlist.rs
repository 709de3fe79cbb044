//! Wishlist: saved-for-later products with set semantics by id.

use crate::product::{Product, ProductId};

#[derive(Debug, Clone, Default)]
pub struct Wishlist {
    entries: Vec<Product>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the product was already present.
    pub fn insert(&mut self, product: &Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.entries.push(product.clone());
        true
    }

    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|p| p.id != id);
        self.entries.len() != before
    }

    /// Flip membership; returns whether the product is wishlisted afterwards.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.remove(product.id) {
            false
        } else {
            self.entries.push(product.clone());
            true
        }
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.entries.iter().any(|p| p.id == id)
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.entries.iter().find(|p| p.id == id)
    }

    pub fn entries(&self) -> &[Product] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
