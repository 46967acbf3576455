//! Error types for lorepo.

use thiserror::Error;

/// Common error type for lorepo.
#[derive(Error, Debug)]
pub enum LorepoError {
    /// Database error.
    ///
    /// Wraps errors from the underlying SQLite connection.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error from the repository filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Validation error for submitted data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// No resource type is registered under the given discriminator.
    #[error("unknown resource type: {0}")]
    UnknownType(String),
}

impl From<rusqlite::Error> for LorepoError {
    fn from(e: rusqlite::Error) -> Self {
        LorepoError::Database(e.to_string())
    }
}

/// Result type alias for lorepo operations.
pub type Result<T> = std::result::Result<T, LorepoError>;
