//! Configuration presets.
//!
//! - `default`: one count snapshot per counting-sort pass, info logging
//! - `detailed`: a count snapshot per prefix-sum step, debug logging
//! - `quiet`: default trace shape, warnings only

use crate::config::{Config, LoggingConfig, TraceOptions};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PresetName {
    Default,
    Detailed,
    Quiet,
}

impl PresetName {
    pub const ALL: [PresetName; 3] = [PresetName::Default, PresetName::Detailed, PresetName::Quiet];

    pub fn as_str(self) -> &'static str {
        match self {
            PresetName::Default => "default",
            PresetName::Detailed => "detailed",
            PresetName::Quiet => "quiet",
        }
    }

    fn description(self) -> &'static str {
        match self {
            PresetName::Default => "Standard trace granularity with info logging",
            PresetName::Detailed => "Per-step counting snapshots with debug logging",
            PresetName::Quiet => "Standard trace granularity, warnings only",
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset: {0}")]
pub struct UnknownPreset(pub String);

impl FromStr for PresetName {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetName::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

/// Summary of a preset for listings.
#[derive(Debug, Clone, Serialize)]
pub struct PresetInfo {
    pub name: PresetName,
    pub description: &'static str,
}

/// Build the configuration for a preset.
pub fn get_preset(name: PresetName) -> Config {
    match name {
        PresetName::Default => Config::default(),
        PresetName::Detailed => Config {
            trace: TraceOptions {
                accumulation_detail: true,
                ..TraceOptions::default()
            },
            logging: LoggingConfig {
                filter: "debug".to_string(),
                ..LoggingConfig::default()
            },
            ..Config::default()
        },
        PresetName::Quiet => Config {
            logging: LoggingConfig {
                filter: "warn".to_string(),
                ..LoggingConfig::default()
            },
            ..Config::default()
        },
    }
}

pub fn list_presets() -> Vec<PresetInfo> {
    PresetName::ALL
        .iter()
        .map(|&name| PresetInfo {
            name,
            description: name.description(),
        })
        .collect()
}
