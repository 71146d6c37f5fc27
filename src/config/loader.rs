// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TestwatchError};

/// Environment variable naming the config file to use.
pub const CONFIG_ENV: &str = "TESTWATCH_CONFIG";

/// Config file looked up in the working directory when `CONFIG_ENV` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "Testwatch.toml";

/// Load a configuration file and return the raw, unvalidated model.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve and load the configuration for this process.
///
/// - `TESTWATCH_CONFIG` set: that file must exist.
/// - Otherwise `Testwatch.toml` is used if present, else defaults.
pub fn load_config() -> Result<ConfigFile> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            let path = PathBuf::from(path);
            if !path.is_file() {
                return Err(TestwatchError::ConfigError(format!(
                    "{CONFIG_ENV} points to {}, which is not a file",
                    path.display()
                )));
            }
            load_and_validate(path)
        }
        None => load_or_default(default_config_path()),
    }
}

/// Load `path` if it exists, otherwise fall back to the default config.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    if path.is_file() {
        load_and_validate(path)
    } else {
        Ok(ConfigFile::default())
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}
