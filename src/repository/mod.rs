//! Cart Repositories
//!
//! Persistence for cart snapshots. A [`CartRepository`] stores one cart per
//! session scope; the store saves after every mutation and loads once when
//! it opens.

use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartLine};

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;

/// Errors related to loading or saving a cart snapshot.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// IO error reading or writing the backing store
    #[error("Failed to access cart storage: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or parsing error
    #[error("Failed to parse stored cart: {0}")]
    Json(#[from] serde_json::Error),
}

/// Cart Record
///
/// The persisted snapshot of a cart. Totals are materialized here for the
/// benefit of other readers of the stored document; on load they are
/// discarded and re-derived from the lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    /// Cart lines in insertion order.
    pub items: Vec<CartLine>,

    /// Sum of line quantities at snapshot time.
    pub total_items: u64,

    /// Sum of line totals in minor units at snapshot time.
    pub total_amount: u64,
}

impl From<&Cart> for CartRecord {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().to_vec(),
            total_items: cart.total_items(),
            total_amount: cart.total_amount(),
        }
    }
}

/// Cart snapshot persistence operations.
#[automock]
pub trait CartRepository {
    /// Load the stored cart snapshot, if one exists.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if a snapshot exists but cannot be
    /// read or parsed.
    fn load(&self) -> Result<Option<CartRecord>, RepositoryError>;

    /// Replace the stored cart snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`RepositoryError`] if the snapshot cannot be written.
    fn save(&mut self, record: &CartRecord) -> Result<(), RepositoryError>;
}
