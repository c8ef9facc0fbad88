//! Error types for the catalog crate.
//!
//! Everything that can go wrong while validating records or talking to the
//! local SQLite store ends up in [`CatalogError`].

use thiserror::Error;

/// Errors raised by record validation and the local store
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A user rating fell outside the 1-10 scale
    #[error("Rating must be between 1 and 10, got {0}")]
    InvalidRating(i64),

    /// SQLite reported a failure
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A JSON column (the genre list) could not be encoded or decoded
    #[error("Failed to (de)serialize stored column: {0}")]
    Json(#[from] serde_json::Error),

    /// The database file's directory could not be prepared
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
