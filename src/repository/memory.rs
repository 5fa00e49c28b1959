//! In-Memory Repository
//!
//! Holds the cart snapshot in memory. Useful for sessions that should not
//! outlive the process and as a lightweight double in tests.

use super::{CartRecord, CartRepository, RepositoryError};

/// A repository keeping the latest cart snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    record: Option<CartRecord>,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-seeded with a snapshot.
    #[must_use]
    pub fn with_record(record: CartRecord) -> Self {
        Self {
            record: Some(record),
        }
    }

    /// Get the stored snapshot, if any.
    #[must_use]
    pub fn record(&self) -> Option<&CartRecord> {
        self.record.as_ref()
    }
}

impl CartRepository for MemoryRepository {
    fn load(&self) -> Result<Option<CartRecord>, RepositoryError> {
        Ok(self.record.clone())
    }

    fn save(&mut self, record: &CartRecord) -> Result<(), RepositoryError> {
        self.record = Some(record.clone());

        Ok(())
    }
}
