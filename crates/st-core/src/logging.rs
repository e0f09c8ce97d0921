//! Tracing subscriber setup for the CLI.

use st_common::{Error, Result};
use st_config::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive in effect: `RUST_LOG` when set, otherwise the config
/// filter raised by `verbose`.
pub fn filter_directive(config: &LoggingConfig, verbose: u8) -> String {
    if let Ok(env) = std::env::var(EnvFilter::DEFAULT_ENV) {
        if !env.trim().is_empty() {
            return env;
        }
    }
    match verbose {
        0 => config.filter.clone(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Parse a filter directive. A malformed directive is a configuration error.
pub fn build_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| Error::Config(format!("invalid log filter {directive:?}: {e}")))
}

/// Install the global subscriber. Logs go to stderr.
pub fn init_logging(config: &LoggingConfig, format: LogFormat, verbose: u8) -> Result<()> {
    let filter = build_filter(&filter_directive(config, verbose))?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .flatten_event(true),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init(),
    };
    installed.map_err(|e| Error::Config(format!("failed to initialize logging: {e}")))
}
