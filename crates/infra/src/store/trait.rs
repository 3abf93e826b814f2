use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use storefront_catalog::{PriceFilter, Product};
use storefront_core::ProductId;
use storefront_orders::Order;

/// Storage backend failure.
///
/// There is no domain meaning here: domain failures (missing product,
/// insufficient stock) are decided by callers on top of successful storage
/// operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend unreachable (connection refused, pool closed, ...).
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// The backend rejected or failed the operation.
    #[error("storage operation failed: {0}")]
    Backend(String),
}

/// Storage interface required by the catalog and order workflows.
///
/// Each method is one atomic backend operation; the trait makes **no**
/// cross-call isolation promise. Callers composing check-then-mutate
/// sequences get exactly the races that composition implies.
#[async_trait]
pub trait Store: Send + Sync {
    /// Look up a single product by id.
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Atomically decrement one product's on-hand quantity.
    ///
    /// The decrement is unconditional: the availability check is the
    /// caller's job, and a concurrent caller may have won the race since
    /// that check, taking the quantity negative.
    async fn decrement_stock(&self, id: ProductId, amount: u32) -> Result<(), StoreError>;

    /// One logical read over the filtered product set: the page slice at
    /// `offset`/`limit` in natural storage order (ascending id), plus the
    /// total count of matching products, consistent with each other.
    async fn count_and_slice(
        &self,
        filter: &PriceFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Product>, u64), StoreError>;

    /// Persist a committed order record.
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError>;

    /// Insert or replace a catalog entry (bootstrap/seed path; products are
    /// otherwise mutated only by order fulfillment).
    async fn upsert_product(&self, product: Product) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> Store for Arc<S>
where
    S: Store + ?Sized,
{
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).find_product(id).await
    }

    async fn decrement_stock(&self, id: ProductId, amount: u32) -> Result<(), StoreError> {
        (**self).decrement_stock(id, amount).await
    }

    async fn count_and_slice(
        &self,
        filter: &PriceFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Product>, u64), StoreError> {
        (**self).count_and_slice(filter, offset, limit).await
    }

    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        (**self).insert_order(order).await
    }

    async fn upsert_product(&self, product: Product) -> Result<(), StoreError> {
        (**self).upsert_product(product).await
    }
}
