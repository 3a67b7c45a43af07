//! Error types for datemask.

use thiserror::Error;

/// Errors that can occur while resolving dates or building a formatter.
#[derive(Error, Debug)]
pub enum DateMaskError {
    #[error("Invalid date: {0}")]
    InvalidInstant(String),

    #[error("Malformed locale table: {0}")]
    MalformedLocaleTable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for datemask operations.
pub type DateMaskResult<T> = Result<T, DateMaskError>;
