//! JSON File Repository
//!
//! Stores the cart snapshot as a single JSON document on disk.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use super::{CartRecord, CartRepository, RepositoryError};

/// A repository keeping the cart snapshot in one JSON file.
///
/// A missing file is not an error: it just means no cart has been saved
/// yet, so [`CartRepository::load`] reports `None`.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Create a repository backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<CartRecord>, RepositoryError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let record: CartRecord = serde_json::from_str(&contents)?;

        Ok(Some(record))
    }

    fn save(&mut self, record: &CartRecord) -> Result<(), RepositoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(record)?;

        fs::write(&self.path, json)?;

        Ok(())
    }
}
