mod catalog_service;
mod errors;

pub use catalog_service::{AddOutcome, Catalog};
pub use errors::{CatalogError, Result};
