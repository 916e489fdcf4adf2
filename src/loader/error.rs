//! Loader-specific error types
//!
//! These only surface from the strict parsing entry points. The lenient
//! loaders used by the panel log them and fall back to empty data.

use thiserror::Error;

/// Errors raised while reading style data
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV content
    #[error("Error while reading CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON document
    #[error("Error while parsing JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid directory scan pattern
    #[error("Invalid scan pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}
