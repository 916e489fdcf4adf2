//! Preference store error types
//!
//! # Error Types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`EncodeError`**: Failures when serializing a value for storage
//! - **`DecodeError`**: Failures when deserializing a stored value
//!
//! Reads fall back to defaults instead of surfacing decode errors, so in
//! practice only writes and opening the store fail.

use thiserror::Error;

/// Preference store errors
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode encoding error
    #[error("Error while encoding preference: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Represents a bincode decoding error
    #[error("Error while decoding preference: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Invalid preference value (e.g. an empty preset name)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
