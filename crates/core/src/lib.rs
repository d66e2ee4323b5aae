//! Receivables Core - Domain entities, services, and traits.
//!
//! This crate contains the aging and metrics logic of the receivables
//! dashboard. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod aging;
pub mod constants;
pub mod dates;
pub mod errors;
pub mod metrics;
pub mod receivables;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
