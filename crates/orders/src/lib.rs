//! Orders domain module.
//!
//! This crate contains business rules for order placement, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod order;

pub use order::{Address, Order, OrderDraft, OrderItem, OrderLine};
