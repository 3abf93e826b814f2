use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_catalog::Product;
use storefront_core::{Entity, OrderId, ProductId, ValueObject};

/// Delivery address. Plain value object; no validation beyond shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub country: String,
    pub zip_code: i64,
}

impl ValueObject for Address {}

/// One requested line of an order: which product, how many units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub bought_quantity: u32,
}

/// A priced line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub bought_quantity: u32,
    /// price × quantity, captured at order time.
    pub subtotal: u64,
}

impl OrderLine {
    /// Price a requested quantity of `product` at its current unit price.
    pub fn price(product: &Product, bought_quantity: u32) -> Self {
        Self {
            product_id: product.id,
            bought_quantity,
            subtotal: product.line_total(bought_quantity),
        }
    }
}

/// A placed order. Created once, immutable thereafter; there is no update or
/// cancel path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub created_on: DateTime<Utc>,
    pub items: Vec<OrderLine>,
    pub user_address: Address,
    pub total_amount: u64,
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// An order attempt in flight.
///
/// The draft accumulates validated lines one at a time; [`OrderDraft::commit`]
/// seals it into an immutable [`Order`]. A draft abandoned after a failed line
/// simply drops — stock decrements already applied for its earlier lines stay
/// applied. The checkout service documents that semantics.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    address: Address,
    lines: Vec<OrderLine>,
}

impl OrderDraft {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, line: OrderLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Sum of line subtotals so far.
    pub fn total_amount(&self) -> u64 {
        self.lines.iter().map(|l| l.subtotal).sum()
    }

    /// Seal the draft into an immutable order.
    pub fn commit(self, id: OrderId, created_on: DateTime<Utc>) -> Order {
        let total_amount = self.total_amount();
        Order {
            id,
            created_on,
            items: self.lines,
            user_address: self.address,
            total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_address() -> Address {
        Address {
            city: "Pune".to_string(),
            country: "India".to_string(),
            zip_code: 411001,
        }
    }

    fn test_time() -> DateTime<Utc> {
        "2024-02-01T10:30:00Z".parse().unwrap()
    }

    #[test]
    fn line_pricing_uses_current_unit_price() {
        let mouse = Product::new(ProductId::new(6), "Mouse", 999, 28);
        let line = OrderLine::price(&mouse, 5);
        assert_eq!(line.product_id, ProductId::new(6));
        assert_eq!(line.bought_quantity, 5);
        assert_eq!(line.subtotal, 4995);
    }

    #[test]
    fn draft_total_sums_line_subtotals() {
        let mouse = Product::new(ProductId::new(6), "Mouse", 999, 28);
        let webcam = Product::new(ProductId::new(10), "WebCam", 1500, 9);

        let mut draft = OrderDraft::new(test_address());
        draft.push(OrderLine::price(&mouse, 2));
        draft.push(OrderLine::price(&webcam, 1));

        assert_eq!(draft.lines().len(), 2);
        assert_eq!(draft.total_amount(), 2 * 999 + 1500);
    }

    #[test]
    fn commit_seals_lines_address_and_total() {
        let speaker = Product::new(ProductId::new(1), "Speaker", 2999, 7);

        let mut draft = OrderDraft::new(test_address());
        draft.push(OrderLine::price(&speaker, 3));

        let id = OrderId::new();
        let order = draft.commit(id, test_time());

        assert_eq!(order.id, id);
        assert_eq!(order.created_on, test_time());
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.user_address, test_address());
        assert_eq!(order.total_amount, 8997);
    }

    #[test]
    fn empty_draft_commits_with_zero_total() {
        // An order with no items is accepted upstream; it just totals zero.
        let order = OrderDraft::new(test_address()).commit(OrderId::new(), test_time());
        assert!(order.items.is_empty());
        assert_eq!(order.total_amount, 0);
    }
}
