//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{AppliedQuantity, Cart, CartError, CartLine, NewCartLine},
    products::ProductId,
    repository::{
        CartRecord, CartRepository, JsonFileRepository, MemoryRepository, RepositoryError,
    },
    store::CartStore,
};
