//! Unified error types for the exporter

use thiserror::Error;

/// Unified error type for all exporter operations
#[derive(Error, Debug)]
pub enum NexsanError {
    // Fetch errors
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Authentication rejected by {0}")]
    Auth(String),

    #[error("Timed out fetching from {0}")]
    Timeout(String),

    // Document errors
    #[error("Malformed status document: {0}")]
    Malformed(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using NexsanError
pub type Result<T> = std::result::Result<T, NexsanError>;
