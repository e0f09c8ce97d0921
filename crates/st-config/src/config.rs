//! Configuration types.
//!
//! Every field has a default so a partial config.json only needs to name
//! what it overrides.

use serde::{Deserialize, Serialize};
use st_common::SCHEMA_VERSION;
use std::fmt;

/// Default initial capacity of a recorder's event buffer.
pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

/// Complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schema_version: String,

    /// Options that shape the recorded trace.
    pub trace: TraceOptions,

    /// Options for the diagnostic log (not the trace).
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: SCHEMA_VERSION.to_string(),
            trace: TraceOptions::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the config to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Options applied by the recorder and the algorithms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceOptions {
    /// Re-snapshot counting sort's `count` buffer after every prefix-sum
    /// step instead of once after the pass.
    pub accumulation_detail: bool,

    /// Initial capacity of the event buffer.
    pub initial_capacity: usize,
}

impl Default for TraceOptions {
    fn default() -> Self {
        TraceOptions {
            accumulation_detail: false,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

/// Diagnostic log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}
