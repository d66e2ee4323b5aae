//! SQLite storage implementation for the receivables dashboard.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `receivables-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The receivable repository
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//!
//! ```text
//!   core (aging, metrics)      server (HTTP)
//!         │                        │
//!         └───────────┬────────────┘
//!                     │
//!                     ▼
//!          storage-sqlite (this crate)
//!                     │
//!                     ▼
//!                 SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod receivables;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use receivables::ReceivableRepository;

// Re-export from receivables-core for convenience
pub use receivables_core::errors::{DatabaseError, Error, Result};
