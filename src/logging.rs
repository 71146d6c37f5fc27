// src/logging.rs

//! Logging setup for `testwatch` using `tracing` + `tracing-subscriber`.
//!
//! Filter resolution:
//! 1. `TESTWATCH_LOG`, as `EnvFilter` directives (`debug`, `testwatch::watch=trace`, ...)
//! 2. `[log] level` from the config file
//! 3. `info`
//!
//! Everything goes to stderr. Stdout belongs to the test suite and its reruns.

use anyhow::{anyhow, Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

use crate::types::LogLevel;

/// Environment variable overriding the configured log level.
pub const LOG_ENV: &str = "TESTWATCH_LOG";

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Install the global subscriber. Call once, before the first lifecycle event.
pub fn init_logging(config_level: Option<LogLevel>) -> Result<()> {
    let filter = resolve_filter(std::env::var(LOG_ENV).ok(), config_level)?;

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("installing log subscriber: {err}"))?;

    Ok(())
}

fn resolve_filter(env: Option<String>, config_level: Option<LogLevel>) -> Result<EnvFilter> {
    match env.as_deref().map(str::trim) {
        Some(directives) if !directives.is_empty() => EnvFilter::try_new(directives)
            .with_context(|| format!("invalid {LOG_ENV} value {directives:?}")),
        _ => {
            let level = LevelFilter::from(config_level.unwrap_or(LogLevel::Info));
            Ok(EnvFilter::default().add_directive(level.into()))
        }
    }
}
