//! Error types for fileshare
//!
//! Provides a unified error type for all storage operations.

use thiserror::Error;

/// Result type alias using FileShareError
pub type Result<T> = std::result::Result<T, FileShareError>;

/// Unified error type for fileshare operations
#[derive(Debug, Error)]
pub enum FileShareError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Upload Errors
    // -------------------------------------------------------------------------
    /// Content exceeded the configured maximum. Raised before anything is written.
    #[error("File too large. Maximum size is {:?}MB", megabytes(.limit))]
    PayloadTooLarge { limit: usize },

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    /// No retrievable content + metadata pair. Deliberately does not say which
    /// half is missing or corrupt.
    #[error("{0}")]
    NotFound(String),
}

impl FileShareError {
    /// The generic not-found outcome used for downloads
    pub fn file_not_found() -> Self {
        FileShareError::NotFound("File not found".to_string())
    }
}

fn megabytes(bytes: &usize) -> f64 {
    *bytes as f64 / (1024.0 * 1024.0)
}
