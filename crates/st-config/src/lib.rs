//! Sort trace configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for config.json
//! - Config resolution (CLI → env → XDG → defaults)
//! - Semantic validation
//! - Configuration presets for common uses

pub mod config;
pub mod preset;
pub mod resolve;
pub mod validate;

pub use config::{Config, LogFormat, LoggingConfig, TraceOptions};
pub use preset::{get_preset, list_presets, PresetInfo, PresetName};
pub use resolve::{resolve_config, ConfigError, ConfigSource, ResolvedConfig, CONFIG_ENV_VAR};
pub use validate::{validate, ValidationError, ValidationResult};
