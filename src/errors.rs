// src/errors.rs

//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestwatchError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("invalid file criteria {pattern:?}: {source}")]
    InvalidCriteria {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("file watcher unavailable: {0}")]
    WatcherUnavailable(#[source] notify::Error),

    #[error("failed to start watching {}: {source}", path.display())]
    WatchStartError {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("failed to spawn rerun `{command}`: {source}")]
    RerunSpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    CliError(#[from] clap::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TestwatchError>;
