//! Shopping cart: one line per product id, quantities always ≥ 1.

use serde::Serialize;

use crate::product::{Price, Product, ProductId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(u32),
    Removed,
    Missing,
}

impl QuantityChange {
    /// A decrement to zero is a removal and is announced like one.
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Self::Removed => Some(crate::commerce::notice::REMOVED_FROM_CART),
            Self::Updated(_) | Self::Missing => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment an existing line or append a new one; returns the line's quantity.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id() == product.id) {
            line.quantity += 1;
            return line.quantity;
        }
        self.lines.push(CartLine {
            product: product.clone(),
            quantity: 1,
        });
        1
    }

    /// Drop the line regardless of quantity.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id() != id);
        self.lines.len() != before
    }

    pub fn change_quantity(&mut self, id: ProductId, delta: i32) -> QuantityChange {
        let Some(line) = self.lines.iter_mut().find(|l| l.id() == id) else {
            return QuantityChange::Missing;
        };
        let next = i64::from(line.quantity) + i64::from(delta);
        if next <= 0 {
            self.remove(id);
            return QuantityChange::Removed;
        }
        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        QuantityChange::Updated(line.quantity)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id() == id)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Badge count: total units, not distinct lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Always recomputed from the current lines.
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: i64, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("P{id}"),
            price: Price::try_from(Decimal::from(price)).unwrap(),
            image: String::new(),
        }
    }

    #[test]
    fn adding_twice_yields_one_line_with_quantity_two() {
        let mut cart = Cart::new();
        let a = product(1, 100);
        assert_eq!(cart.add(&a), 1);
        assert_eq!(cart.add(&a), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(a.id).map(|l| l.quantity), Some(2));
    }

    #[test]
    fn decrement_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&product(1, 10));
        cart.add(&product(2, 20));
        assert_eq!(cart.change_quantity(ProductId::new(1), -1), QuantityChange::Removed);
        assert_eq!(cart.len(), 1);
        assert!(cart.line(ProductId::new(1)).is_none());
    }

    #[test]
    fn large_negative_delta_removes_instead_of_underflowing() {
        let mut cart = Cart::new();
        cart.add(&product(1, 10));
        assert_eq!(cart.change_quantity(ProductId::new(1), -5), QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn quantity_change_on_unknown_line_is_missing() {
        let mut cart = Cart::new();
        assert_eq!(cart.change_quantity(ProductId::new(3), 1), QuantityChange::Missing);
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_ignores_quantity() {
        let mut cart = Cart::new();
        let a = product(1, 10);
        for _ in 0..4 {
            cart.add(&a);
        }
        assert!(cart.remove(a.id));
        assert!(!cart.remove(a.id));
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn total_tracks_every_mutation() {
        enum Op {
            Add(i64),
            Delta(i64, i32),
            Remove(i64),
        }

        let catalog = [product(1, 100), product(2, 50)];
        let mut cart = Cart::new();
        let ops = [
            Op::Add(1),
            Op::Add(2),
            Op::Delta(1, 3),
            Op::Delta(2, -1),
            Op::Add(2),
            Op::Remove(1),
        ];
        for op in ops {
            match op {
                Op::Add(id) => {
                    let p = catalog.iter().find(|p| p.id.get() == id).unwrap();
                    cart.add(p);
                }
                Op::Delta(id, delta) => {
                    cart.change_quantity(ProductId::new(id), delta);
                }
                Op::Remove(id) => {
                    cart.remove(ProductId::new(id));
                }
            }
            let expected: Decimal = cart
                .lines()
                .iter()
                .map(|l| l.product.price.amount() * Decimal::from(l.quantity))
                .sum();
            assert_eq!(cart.total().amount(), expected);
            assert!(cart.lines().iter().all(|l| l.quantity >= 1));
        }
        assert_eq!(cart.total().label("₹"), "₹50.00");
    }
}
