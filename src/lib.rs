//! Library inventory and lending.
//!
//! Books are tracked by ISBN with the number of copies on hand, and
//! outstanding loans are grouped per ISBN. The whole catalog is persisted
//! as a single JSON document after every change.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::catalog::{AddOutcome, Catalog, CatalogError};
pub use domain::{BookRecord, Borrower, Inventory, Isbn, LoanEntry, Quantity};
