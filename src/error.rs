//! Error types for the Inquest library.
//!
//! All fallible operations return [`Result`], backed by the [`EngineError`]
//! enum. Question answering itself is infallible at the engine boundary:
//! handler errors are caught by the router and degrade to fallback answers,
//! so `EngineError` surfaces only from the dataset loader and inside
//! handler implementations.

use std::io;

use anyhow;
use thiserror::Error;

/// The main error type for Inquest operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Dataset-related errors (malformed rows, misaligned columns)
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// CSV parsing errors from the loader
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Analysis-related errors (feature extraction internals)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Handler errors (empty dataset slice, missing column, unknown part)
    #[error("Handler error: {0}")]
    Handler(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with EngineError.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Create a new dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        EngineError::Dataset(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        EngineError::Analysis(msg.into())
    }

    /// Create a new handler error.
    pub fn handler<S: Into<String>>(msg: S) -> Self {
        EngineError::Handler(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        EngineError::Other(msg.into())
    }
}
