//! Backend wiring: storage selection and the services handlers depend on.

use std::sync::Arc;

use storefront_catalog::{PageRequest, PriceFilter, ProductPage};
use storefront_infra::checkout::{Checkout, CheckoutError};
use storefront_infra::store::{InMemoryStore, Store, StoreError};
use storefront_infra::{catalog, seed};
use storefront_orders::{Address, Order, OrderItem};

/// Shared application services, injected into handlers as an extension.
///
/// Holds the storage context explicitly — handlers never reach for globals.
pub struct AppServices {
    store: Arc<dyn Store>,
    checkout: Checkout<Arc<dyn Store>>,
}

impl AppServices {
    /// Wire services over an explicit storage backend.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            checkout: Checkout::new(store.clone()),
            store,
        }
    }

    /// In-memory backend (dev/test) with the demo catalog loaded.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let store = Arc::new(InMemoryStore::new());
        seed::load_demo_catalog(&store).await?;
        Ok(Self::new(store))
    }

    /// Postgres backend over the given connection string.
    #[cfg(feature = "postgres")]
    pub async fn postgres(url: &str) -> Result<Self, StoreError> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect(url)
            .await
            .map_err(|e| StoreError::Unavailable(format!("connect: {e}")))?;
        let store = Arc::new(storefront_infra::store::PostgresStore::new(pool));
        Ok(Self::new(store))
    }

    pub async fn list_products(
        &self,
        request: &PageRequest,
        filter: &PriceFilter,
    ) -> Result<ProductPage, StoreError> {
        catalog::list_products(&self.store, request, filter).await
    }

    pub async fn place_order(
        &self,
        items: &[OrderItem],
        address: Address,
    ) -> Result<Order, CheckoutError> {
        self.checkout.place_order(items, address).await
    }
}

/// Select a backend from the environment: `DATABASE_URL` (with the
/// `postgres` feature enabled) picks Postgres; otherwise the seeded
/// in-memory store.
pub async fn build_services() -> anyhow::Result<AppServices> {
    #[cfg(feature = "postgres")]
    if let Ok(url) = std::env::var("DATABASE_URL") {
        tracing::info!("using postgres backend");
        return Ok(AppServices::postgres(&url).await?);
    }

    tracing::info!("using in-memory backend with demo catalog");
    Ok(AppServices::in_memory().await?)
}
