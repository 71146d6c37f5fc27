// src/config/validate.rs

use crate::config::model::RawConfigFile;
use crate::errors::{Result, TestwatchError};
use crate::watch::CriteriaMatcher;

/// Basic semantic validation of a loaded configuration.
///
/// Checks:
/// - `run.path` is not empty
/// - `run.interpreter`, when given, is not empty
/// - every `watch.criteria` pattern compiles
///
/// Event kinds are never rejected; the watch controller filters them.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.run.path.as_os_str().is_empty() {
        return Err(TestwatchError::ConfigError(
            "run.path must not be empty".to_string(),
        ));
    }

    if let Some(interpreter) = &cfg.run.interpreter {
        if interpreter.trim().is_empty() {
            return Err(TestwatchError::ConfigError(
                "run.interpreter must not be empty when set".to_string(),
            ));
        }
    }

    let mut criteria = CriteriaMatcher::empty();
    for pattern in &cfg.watch.criteria {
        criteria.add(pattern)?;
    }

    Ok(())
}
