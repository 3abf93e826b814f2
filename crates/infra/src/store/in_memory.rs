use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;

use storefront_catalog::{PriceFilter, Product};
use storefront_core::{OrderId, ProductId};
use storefront_orders::Order;

use super::r#trait::{Store, StoreError};

/// In-memory storage backend.
///
/// Intended for tests/dev. Natural storage order is ascending product id.
/// Every trait method takes its lock exactly once, so each operation is
/// atomic on its own — and nothing more (see [`Store`]).
#[derive(Debug, Default)]
pub struct InMemoryStore {
    products: RwLock<BTreeMap<ProductId, Product>>,
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a stored order (introspection/test helper).
    pub fn order(&self, id: &OrderId) -> Option<Order> {
        self.orders.read().ok()?.get(id).cloned()
    }

    pub fn order_count(&self) -> usize {
        self.orders.read().map(|m| m.len()).unwrap_or(0)
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

#[async_trait]
impl Store for InMemoryStore {
    async fn find_product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.get(&id).cloned())
    }

    async fn decrement_stock(&self, id: ProductId, amount: u32) -> Result<(), StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        let product = products
            .get_mut(&id)
            .ok_or_else(|| StoreError::Backend(format!("decrement_stock: no product with id {id}")))?;
        product.quantity -= i64::from(amount);
        Ok(())
    }

    async fn count_and_slice(
        &self,
        filter: &PriceFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<Product>, u64), StoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;

        // Count and slice under the same lock acquisition: one logical read,
        // so the total can never disagree with the slice.
        let mut total = 0u64;
        let mut data = Vec::new();
        for product in products.values().filter(|p| filter.matches(p.price)) {
            if total >= offset && (data.len() as u64) < limit {
                data.push(product.clone());
            }
            total += 1;
        }
        Ok((data, total))
    }

    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|_| poisoned())?;
        orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn upsert_product(&self, product: Product) -> Result<(), StoreError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        products.insert(product.id, product);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    async fn seeded() -> InMemoryStore {
        let store = InMemoryStore::new();
        seed::load_demo_catalog(&store).await.unwrap();
        store
    }

    #[tokio::test]
    async fn natural_order_is_ascending_id_regardless_of_insertion_order() {
        let store = InMemoryStore::new();
        for id in [7i64, 2, 9] {
            store
                .upsert_product(Product::new(ProductId::new(id), format!("p{id}"), 100, 1))
                .await
                .unwrap();
        }

        let (data, total) = store
            .count_and_slice(&PriceFilter::unbounded(), 0, 10)
            .await
            .unwrap();
        assert_eq!(total, 3);
        let ids: Vec<i64> = data.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![2, 7, 9]);
    }

    #[tokio::test]
    async fn slice_never_exceeds_limit_and_total_counts_the_filtered_set() {
        let store = seeded().await;
        let filter = PriceFilter::new(None, Some(3000.0));

        for limit in [1u64, 3, 6, 10] {
            for offset in [0u64, 2, 5, 6, 50] {
                let (data, total) = store.count_and_slice(&filter, offset, limit).await.unwrap();
                assert!(data.len() as u64 <= limit);
                // Six demo products are priced at 3000 or less.
                assert_eq!(total, 6);
                assert!(data.iter().all(|p| p.price <= 3000));
            }
        }
    }

    #[tokio::test]
    async fn price_filter_bounds_select_the_expected_products() {
        let store = seeded().await;

        let (_, total) = store
            .count_and_slice(&PriceFilter::new(Some(5000.0), None), 0, 10)
            .await
            .unwrap();
        assert_eq!(total, 4);

        let (data, total) = store
            .count_and_slice(&PriceFilter::new(Some(1000.0), Some(2000.0)), 0, 10)
            .await
            .unwrap();
        assert_eq!(total, 2);
        let ids: Vec<i64> = data.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![9, 10]);
    }

    #[tokio::test]
    async fn offset_beyond_the_end_yields_an_empty_slice_with_the_real_total() {
        let store = seeded().await;
        let (data, total) = store
            .count_and_slice(&PriceFilter::unbounded(), 100, 10)
            .await
            .unwrap();
        assert!(data.is_empty());
        assert_eq!(total, 10);
    }

    #[tokio::test]
    async fn decrement_is_unconditional_so_interleaved_checkouts_can_oversell() {
        // Two order attempts, both validated against the same snapshot before
        // either decrement lands. This is the reproduced behavior of the
        // original system, pinned on purpose (see DESIGN.md) — the
        // availability check and the decrement are separate atomic
        // operations, so both attempts pass and stock goes negative.
        let store = InMemoryStore::new();
        let id = ProductId::new(9);
        store
            .upsert_product(Product::new(id, "Cooling Pad", 1200, 5))
            .await
            .unwrap();

        let seen_by_a = store.find_product(id).await.unwrap().unwrap();
        let seen_by_b = store.find_product(id).await.unwrap().unwrap();
        assert!(seen_by_a.can_fulfill(3));
        assert!(seen_by_b.can_fulfill(3));

        store.decrement_stock(id, 3).await.unwrap();
        store.decrement_stock(id, 3).await.unwrap();

        let after = store.find_product(id).await.unwrap().unwrap();
        assert_eq!(after.quantity, -1);
    }

    #[tokio::test]
    async fn decrementing_an_unknown_product_fails() {
        let store = InMemoryStore::new();
        let err = store
            .decrement_stock(ProductId::new(404), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
