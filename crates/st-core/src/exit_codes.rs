//! Exit codes for the sort-trace CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.

use st_common::Error;

/// Exit codes for sort-trace operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command succeeded
    Clean = 0,

    /// Trace did not replay to its recorded result, or failed to load
    VerificationFailed = 1,

    /// Malformed command line
    UsageError = 2,

    /// Configuration error
    ConfigError = 10,

    /// Algorithm parameters rejected
    InvalidParams = 11,

    /// Algorithm name not registered
    UnknownAlgorithm = 12,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::UnknownAlgorithm(_) => ExitCode::UnknownAlgorithm,
            Error::InvalidParams(_) => ExitCode::InvalidParams,
            Error::Replay(_) | Error::IncompatibleSchema { .. } | Error::DigestMismatch { .. } => {
                ExitCode::VerificationFailed
            }
            Error::Config(_) => ExitCode::ConfigError,
            Error::Io(_) | Error::Json(_) => ExitCode::IoError,
            Error::InvariantViolation(_) => ExitCode::InternalError,
        }
    }
}
