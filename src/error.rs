//! Error types for medal-tally
//!
//! Module-specific error types using thiserror for clear error propagation.
//! Ingress-side errors (decode, validation) are recovered locally: the event
//! is dropped and the connection stays open.

use thiserror::Error;

/// Main error type for medal-tally
#[derive(Error, Debug)]
pub enum Error {
    /// Incoming payload is not valid JSON
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Well-formed payload with missing country or unknown medal
    #[error("invalid update: {0}")]
    Validation(String),

    /// Socket I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using medal-tally Error
pub type Result<T> = std::result::Result<T, Error>;
