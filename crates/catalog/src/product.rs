use serde::{Deserialize, Serialize};

use storefront_core::{Entity, ProductId};

/// A sellable catalog entry.
///
/// `quantity` is signed on purpose: stock decrements are independent atomic
/// storage operations, and two concurrent checkouts that both pass the
/// availability check can jointly take it below zero. See the checkout
/// service for the full semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in the smallest currency unit.
    pub price: u64,
    /// Quantity on hand.
    pub quantity: i64,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: u64, quantity: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Whether `bought` units can be fulfilled from current stock.
    pub fn can_fulfill(&self, bought: u32) -> bool {
        self.quantity >= i64::from(bought)
    }

    /// Price of `bought` units at the current unit price.
    pub fn line_total(&self, bought: u32) -> u64 {
        self.price * u64::from(bought)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse() -> Product {
        Product::new(ProductId::new(6), "Mouse", 999, 28)
    }

    #[test]
    fn can_fulfill_is_inclusive_at_the_boundary() {
        let p = mouse();
        assert!(p.can_fulfill(28));
        assert!(!p.can_fulfill(29));
    }

    #[test]
    fn negative_stock_fulfills_nothing() {
        let p = Product::new(ProductId::new(9), "Cooling Pad", 1200, -1);
        assert!(!p.can_fulfill(1));
        assert!(!p.can_fulfill(0));
    }

    #[test]
    fn line_total_is_price_times_quantity() {
        assert_eq!(mouse().line_total(5), 4995);
        assert_eq!(mouse().line_total(0), 0);
    }
}
