//! Error types for the labscribe library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for labscribe operations.
///
/// Expected-empty outcomes (no parseable tests, no abnormal findings) and
/// consistency-guard rejections are not errors; see [`crate::Outcome`].
#[derive(Debug, Error)]
pub enum LabscribeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Request shape violates the caller contract (e.g. missing input).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The extraction collaborator failed outright.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// Reference catalog could not be loaded or is malformed.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for labscribe operations.
pub type Result<T> = std::result::Result<T, LabscribeError>;
