pub mod book;
pub mod errors;
pub mod events;
pub mod inventory;
pub mod loan;
pub mod value_objects;

pub use book::*;
pub use errors::*;
pub use events::*;
pub use inventory::*;
pub use loan::*;
pub use value_objects::*;
