//! Error types for the sort trace engine.

use thiserror::Error;

/// Result type alias for sort trace operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the sort trace engine.
#[derive(Error, Debug)]
pub enum Error {
    // Request errors (10-19)
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    // Instrumentation errors (20-29)
    #[error("trace invariant violated: {0}")]
    InvariantViolation(String),

    // Replay errors (30-39)
    #[error("replay failed: {0}")]
    Replay(String),

    #[error("trace schema version {found} is not compatible (expected {expected})")]
    IncompatibleSchema { found: String, expected: String },

    #[error("trace digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },

    // Configuration errors (40-49)
    #[error("configuration error: {0}")]
    Config(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::UnknownAlgorithm(_) => 10,
            Error::InvalidParams(_) => 11,
            Error::InvariantViolation(_) => 20,
            Error::Replay(_) => 30,
            Error::IncompatibleSchema { .. } => 31,
            Error::DigestMismatch { .. } => 32,
            Error::Config(_) => 40,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }
}
