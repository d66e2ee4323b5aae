//! SQLite storage implementation for receivables.

mod model;
mod repository;

pub use model::{ImportedReceivableDB, ReceivableDB, ReceivableWorkflowChangeset};
pub use repository::ReceivableRepository;
