use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::codec;
use crate::domain::Inventory;
use crate::ports::catalog_store::{CatalogStore as CatalogStoreTrait, Result, StoreError};

/// JSON file implementation of CatalogStore
///
/// The whole catalog lives in a single document that is rewritten on
/// every save. Writes go to a temporary file next to the target which is
/// then renamed over it, so readers only ever see a complete document.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Create a store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the temporary file is created in
    ///
    /// Must be on the same filesystem as the target for the rename to be atomic.
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_atomically(&self, bytes: &[u8]) -> io::Result<()> {
        let mut file = NamedTempFile::new_in(self.parent_dir())?;
        file.write_all(bytes)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl CatalogStoreTrait for CatalogStore {
    /// Read and decode the catalog file
    ///
    /// A missing file is a first run and yields an empty inventory.
    fn load(&self) -> Result<Inventory> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no catalog file yet, starting empty");
                return Ok(Inventory::new());
            }
            Err(e) => return Err(StoreError::Unavailable(Box::new(e))),
        };

        let inventory = codec::decode(&bytes).map_err(|e| StoreError::Corrupt(Box::new(e)))?;
        tracing::debug!(
            path = %self.path.display(),
            books = inventory.books().count(),
            loan_groups = inventory.loan_groups().count(),
            "catalog loaded"
        );
        Ok(inventory)
    }

    /// Encode and atomically replace the catalog file
    fn save(&self, inventory: &Inventory) -> Result<()> {
        let bytes = codec::encode(inventory).map_err(|e| StoreError::Unavailable(Box::new(e)))?;
        self.write_atomically(&bytes)
            .map_err(|e| StoreError::Unavailable(Box::new(e)))?;

        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "catalog saved");
        Ok(())
    }
}
