//! Structured error types for readlist-core.
//!
//! Uses `thiserror` so the list screen and the CLI can match on causes.
//! Binary crates wrap these in `anyhow` for convenience.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// Main error type for readlist-core operations
#[derive(Error, Debug)]
pub enum ReadlistError {
    /// SQLite statement or connection failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation failed (creating the data directory, reading config)
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Input rejected before reaching storage
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// No book with this id
    #[error("Book {id} not found")]
    NotFound { id: i64 },

    /// Row contents the model cannot represent (e.g. unknown status)
    #[error("Invalid data in {context}: {reason}")]
    InvalidData { context: String, reason: String },

    /// Configuration error
    #[error("Configuration error in {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

/// Result type alias for readlist-core operations
pub type Result<T> = std::result::Result<T, ReadlistError>;

impl ReadlistError {
    /// Create an invalid data error with context
    pub fn invalid_data(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReadlistError::NotFound { id: 42 };
        assert_eq!(err.to_string(), "Book 42 not found");

        let err = ReadlistError::invalid_data("books.status", "unknown status 'paused'");
        assert!(err.to_string().contains("books.status"));
        assert!(err.to_string().contains("paused"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let err: ReadlistError = io_err.into();

        assert!(matches!(err, ReadlistError::Io { .. }));
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: ReadlistError = ValidationError::Empty { field: "title" }.into();
        assert!(matches!(err, ReadlistError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid input: title cannot be empty");
    }
}
