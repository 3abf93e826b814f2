//! Order placement workflow.
//!
//! One attempt walks the requested lines in request order: look the product
//! up, check availability, price the line, decrement stock **immediately**,
//! then move on. After the last line the draft is committed — stamped, given
//! a fresh id, persisted — and returned.
//!
//! Two properties of the stock handling are deliberate (see DESIGN.md):
//!
//! - a failed line aborts the order but does **not** roll back decrements
//!   already applied for earlier lines;
//! - the availability check and the decrement are separate storage
//!   operations, so concurrent attempts against the same product can both
//!   pass the check and jointly drive stock negative.

use chrono::Utc;
use thiserror::Error;
use tracing::instrument;

use storefront_core::{OrderId, ProductId};
use storefront_orders::{Address, Order, OrderDraft, OrderItem, OrderLine};

use crate::store::{Store, StoreError};

/// Order placement failure.
///
/// Domain failures carry enough detail to identify the failing line. Both
/// abort processing immediately; no retry is attempted.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The referenced product does not exist in storage.
    #[error("product with id {0} not found")]
    ProductNotFound(ProductId),

    /// Requested quantity exceeds the on-hand quantity.
    #[error("product with id {product_id} has only {available} quantity left")]
    InsufficientStock {
        product_id: ProductId,
        available: i64,
    },

    /// The storage backend failed; propagated as-is.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Order processor bound to a storage backend.
///
/// The backend is injected at construction; its lifecycle is owned by the
/// process entry point.
#[derive(Debug, Clone)]
pub struct Checkout<S> {
    store: S,
}

impl<S: Store> Checkout<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Place an order for `items`, processed in the given order, shipped to
    /// `address`.
    #[instrument(skip(self, items, address), fields(lines = items.len()))]
    pub async fn place_order(
        &self,
        items: &[OrderItem],
        address: Address,
    ) -> Result<Order, CheckoutError> {
        let mut draft = OrderDraft::new(address);

        for item in items {
            let product = self
                .store
                .find_product(item.product_id)
                .await?
                .ok_or(CheckoutError::ProductNotFound(item.product_id))?;

            if !product.can_fulfill(item.bought_quantity) {
                return Err(CheckoutError::InsufficientStock {
                    product_id: product.id,
                    available: product.quantity,
                });
            }

            // Decrement now, not at commit time. Lines validated before a
            // later failure keep their decrement.
            self.store
                .decrement_stock(item.product_id, item.bought_quantity)
                .await?;
            draft.push(OrderLine::price(&product, item.bought_quantity));
        }

        let order = draft.commit(OrderId::new(), Utc::now());
        self.store.insert_order(&order).await?;

        tracing::info!(order_id = %order.id, total_amount = order.total_amount, "order placed");
        Ok(order)
    }
}
