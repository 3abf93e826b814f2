//! Infrastructure layer: storage backends and request workflows.

pub mod catalog;
pub mod checkout;
pub mod seed;
pub mod store;

pub use catalog::list_products;
pub use checkout::{Checkout, CheckoutError};
pub use store::{InMemoryStore, Store, StoreError};
