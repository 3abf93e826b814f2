//! Demo catalog bootstrap.
//!
//! Seeding is a one-time setup step owned by the process entry point, not a
//! request path. The data mirrors the fixture catalog the service has always
//! shipped with.

use tracing::info;

use storefront_catalog::Product;
use storefront_core::ProductId;

use crate::store::{Store, StoreError};

/// The fixture catalog: ten products, ids 1 through 10.
pub fn demo_products() -> Vec<Product> {
    [
        (1, "Speaker", 2999, 7),
        (2, "Earbud", 6999, 4),
        (3, "Watch", 13990, 6),
        (4, "Headphone", 26999, 1),
        (5, "Monitor", 39999, 5),
        (6, "Mouse", 999, 28),
        (7, "Keyboard", 2890, 7),
        (8, "Extension", 799, 30),
        (9, "Cooling Pad", 1200, 2),
        (10, "WebCam", 1500, 9),
    ]
    .into_iter()
    .map(|(id, name, price, quantity)| Product::new(ProductId::new(id), name, price, quantity))
    .collect()
}

/// Load the fixture catalog into `store` (upserts; safe to run twice).
pub async fn load_demo_catalog<S: Store>(store: &S) -> Result<(), StoreError> {
    for product in demo_products() {
        store.upsert_product(product).await?;
    }
    info!("loaded demo catalog");
    Ok(())
}
