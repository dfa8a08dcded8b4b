use std::io;
use std::sync::Mutex;

use crate::domain::Inventory;
use crate::ports::catalog_store::{CatalogStore as CatalogStoreTrait, Result, StoreError};

/// In-memory implementation of CatalogStore
///
/// Keeps the last saved inventory and counts saves so tests can
/// check which operations persisted.
#[derive(Debug, Default)]
pub struct CatalogStore {
    saved: Mutex<Option<Inventory>>,
    save_count: Mutex<usize>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with previously persisted state
    pub fn with_inventory(inventory: Inventory) -> Self {
        Self {
            saved: Mutex::new(Some(inventory)),
            save_count: Mutex::new(0),
        }
    }

    /// Last saved inventory, if any
    pub fn saved(&self) -> Option<Inventory> {
        self.saved.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        *self.save_count.lock().unwrap()
    }
}

impl CatalogStoreTrait for CatalogStore {
    fn load(&self) -> Result<Inventory> {
        Ok(self.saved().unwrap_or_default())
    }

    fn save(&self, inventory: &Inventory) -> Result<()> {
        *self.saved.lock().unwrap() = Some(inventory.clone());
        *self.save_count.lock().unwrap() += 1;
        Ok(())
    }
}

/// Mock store whose reads or writes fail
///
/// Loads succeed with an empty inventory unless built with `corrupt()`.
/// Saves always fail as if the disk were full.
#[derive(Debug, Default)]
pub struct FailingCatalogStore {
    corrupt: bool,
}

impl FailingCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose persisted content cannot be parsed
    pub fn corrupt() -> Self {
        Self { corrupt: true }
    }
}

impl CatalogStoreTrait for FailingCatalogStore {
    fn load(&self) -> Result<Inventory> {
        if self.corrupt {
            return Err(StoreError::Corrupt("unexpected end of document".into()));
        }
        Ok(Inventory::new())
    }

    fn save(&self, _inventory: &Inventory) -> Result<()> {
        Err(StoreError::Unavailable(Box::new(io::Error::other(
            "no space left on device",
        ))))
    }
}
