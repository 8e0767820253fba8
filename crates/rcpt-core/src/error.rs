//! Error types for the rcpt-core library.
//!
//! Field extraction itself never fails: unmatched or unparseable fields fall
//! back to their sentinel defaults. These errors cover the surrounding layer
//! (configuration files and other I/O).

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
