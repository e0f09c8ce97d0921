//! Config resolution: explicit path → preset → env → XDG → defaults.

use crate::config::Config;
use crate::preset::{get_preset, PresetName};
use crate::validate::validate;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "SORT_TRACE_CONFIG";

/// File name looked up under the user config directory.
const CONFIG_DIR_NAME: &str = "sort-trace";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<ConfigError> for st_common::Error {
    fn from(err: ConfigError) -> Self {
        st_common::Error::Config(err.to_string())
    }
}

/// Where the effective config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Preset(PresetName),
    Env(PathBuf),
    UserDir(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(p) => write!(f, "explicit:{}", p.display()),
            ConfigSource::Preset(name) => write!(f, "preset:{name}"),
            ConfigSource::Env(p) => write!(f, "env:{}", p.display()),
            ConfigSource::UserDir(p) => write!(f, "user:{}", p.display()),
            ConfigSource::Defaults => write!(f, "defaults"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Resolve the effective configuration.
///
/// An explicit path or `SORT_TRACE_CONFIG` that cannot be read is an error.
/// A missing file in the user config directory falls back to defaults.
pub fn resolve_config(
    explicit: Option<&Path>,
    preset: Option<PresetName>,
) -> Result<ResolvedConfig, ConfigError> {
    let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let user_path = dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    resolve_with(explicit, preset, env_path, user_path)
}

fn resolve_with(
    explicit: Option<&Path>,
    preset: Option<PresetName>,
    env_path: Option<PathBuf>,
    user_path: Option<PathBuf>,
) -> Result<ResolvedConfig, ConfigError> {
    let resolved = if let Some(path) = explicit {
        ResolvedConfig {
            config: load_file(path)?,
            source: ConfigSource::Explicit(path.to_path_buf()),
        }
    } else if let Some(name) = preset {
        ResolvedConfig {
            config: get_preset(name),
            source: ConfigSource::Preset(name),
        }
    } else if let Some(path) = env_path {
        ResolvedConfig {
            config: load_file(&path)?,
            source: ConfigSource::Env(path),
        }
    } else {
        match user_path.filter(|p| p.is_file()) {
            Some(path) => ResolvedConfig {
                config: load_file(&path)?,
                source: ConfigSource::UserDir(path),
            },
            None => ResolvedConfig {
                config: Config::default(),
                source: ConfigSource::Defaults,
            },
        }
    };

    let result = validate(&resolved.config);
    if !result.is_ok() {
        return Err(ConfigError::Invalid(result.summary()));
    }
    Ok(resolved)
}

/// Load and parse one config file.
pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_json(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path, name: &str, json: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = write_config(dir.path(), "a.json", r#"{"trace": {"initial_capacity": 8}}"#);
        let env = write_config(dir.path(), "b.json", r#"{"trace": {"initial_capacity": 9}}"#);

        let resolved = resolve_with(
            Some(&explicit),
            Some(PresetName::Detailed),
            Some(env),
            None,
        )
        .unwrap();
        assert_eq!(resolved.config.trace.initial_capacity, 8);
        assert_eq!(resolved.source, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn preset_beats_env() {
        let dir = tempfile::tempdir().unwrap();
        let env = write_config(dir.path(), "env.json", "{}");
        let resolved = resolve_with(None, Some(PresetName::Quiet), Some(env), None).unwrap();
        assert_eq!(resolved.source, ConfigSource::Preset(PresetName::Quiet));
        assert_eq!(resolved.config.logging.filter, "warn");
    }

    #[test]
    fn env_then_user_dir() {
        let dir = tempfile::tempdir().unwrap();
        let env = write_config(dir.path(), "env.json", r#"{"logging": {"filter": "trace"}}"#);
        let user = write_config(dir.path(), "user.json", r#"{"logging": {"filter": "debug"}}"#);

        let resolved = resolve_with(None, None, Some(env.clone()), Some(user.clone())).unwrap();
        assert_eq!(resolved.source, ConfigSource::Env(env));
        assert_eq!(resolved.config.logging.filter, "trace");

        let resolved = resolve_with(None, None, None, Some(user.clone())).unwrap();
        assert_eq!(resolved.source, ConfigSource::UserDir(user));
        assert_eq!(resolved.config.logging.filter, "debug");
    }

    #[test]
    fn missing_user_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let resolved =
            resolve_with(None, None, None, Some(dir.path().join("absent.json"))).unwrap();
        assert_eq!(resolved.source, ConfigSource::Defaults);
        assert_eq!(resolved.config, Config::default());
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let err = resolve_with(Some(Path::new("/nonexistent/config.json")), None, None, None)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "bad.json", "{not json");
        let err = resolve_with(Some(&path), None, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "zero.json", r#"{"trace": {"initial_capacity": 0}}"#);
        let err = resolve_with(Some(&path), None, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref msg) if msg.contains("initial_capacity")));
    }

    #[test]
    fn converts_into_common_error() {
        let err: st_common::Error = ConfigError::Invalid("x".to_string()).into();
        assert_eq!(err.code(), 40);
    }
}
