//! Core error types for the receivables application.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer,
//! and HTTP failures of the accounting client are folded into [`Error::Transport`].
//!
//! Unparseable dates and balances are deliberately absent from this module:
//! the normalizers degrade them to `Invalid` / zero instead of failing.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the receivables application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Receivable not found: {0}")]
    NotFound(String),

    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Invalid bucket scheme: {0}")]
    InvalidScheme(String),

    #[error("Failed to load configuration: {0}")]
    ConfigIO(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// True when the error means "the patch target does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::Database(DatabaseError::NotFound(_))
        )
    }

    /// True when the repository could not be reached or failed to answer.
    ///
    /// These are the failures a caller should show as a visible error state;
    /// nothing in the core retries them.
    pub fn is_transport_failure(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::Database(db) => !matches!(
                db,
                DatabaseError::NotFound(_) | DatabaseError::UniqueViolation(_)
            ),
            _ => false,
        }
    }
}

/// Storage-agnostic error type for repository operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors (Diesel, SQLite, etc.) into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Unknown aging bucket '{bucket}' in scheme '{scheme}'")]
    UnknownBucket { scheme: String, bucket: String },

    #[error("Unknown bucket scheme '{0}'")]
    UnknownScheme(String),

    #[error("Unsupported action taken value '{0}'")]
    UnsupportedActionTaken(String),
}

/// Errors raised while reading an accounting export or report payload.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed report payload: {0}")]
    MalformedReport(String),

    #[error("Accounting report import is not configured")]
    NotConfigured,
}

// === From implementations for common error types ===

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ConfigIO(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
