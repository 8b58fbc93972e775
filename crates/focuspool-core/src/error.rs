//! Core error types for focuspool-core.
//!
//! Persistence failures and input validation surface through this
//! hierarchy; malformed stored data never does (it falls back to
//! defaults at the load site instead).

use thiserror::Error;

/// Core error type for focuspool-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Store-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read a key's value
    #[error("Failed to read key '{key}': {source}")]
    ReadFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a key's value
    #[error("Failed to write key '{key}': {source}")]
    WriteFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove a key
    #[error("Failed to remove key '{key}': {source}")]
    RemoveFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The store's backing location could not be resolved or created
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Task title is empty or whitespace-only
    #[error("Task title must not be empty")]
    EmptyTitle,

    /// Referenced task does not exist
    #[error("Unknown task: {0}")]
    UnknownTask(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
