//! Semantic validation of a loaded configuration.

use crate::config::Config;
use serde::Serialize;
use st_common::schema::is_compatible;
use std::fmt;

/// Largest accepted initial event capacity.
pub const MAX_INITIAL_CAPACITY: usize = 1_000_000;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of validating a config.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// All errors joined for display.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validate a config, collecting every problem rather than stopping at the
/// first.
pub fn validate(config: &Config) -> ValidationResult {
    let mut result = ValidationResult::default();

    if !is_compatible(&config.schema_version) {
        result.push(
            "schema_version",
            format!("incompatible schema version {}", config.schema_version),
        );
    }

    let capacity = config.trace.initial_capacity;
    if capacity == 0 || capacity > MAX_INITIAL_CAPACITY {
        result.push(
            "trace.initial_capacity",
            format!("must be in 1..={MAX_INITIAL_CAPACITY}, got {capacity}"),
        );
    }

    if config.logging.filter.trim().is_empty() {
        result.push("logging.filter", "must not be empty");
    }

    result
}
