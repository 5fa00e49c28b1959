//! Trolley
//!
//! Trolley is a session-scoped shopping cart engine with quantity-merge and stock-clamping semantics over pluggable persistence.

pub mod cart;
pub mod prelude;
pub mod products;
pub mod repository;
pub mod store;
