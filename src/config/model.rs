// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::TestwatchError;
use crate::types::{LogLevel, RawEventKind};

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [log]
/// level = "debug"
///
/// [run]
/// path = "tests"
/// command = ["cargo", "test"]
///
/// [watch]
/// paths = ["src"]
/// events = ["modify", "create"]
/// criteria = ['\.toml$']
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub log: LogSection,

    #[serde(default)]
    pub run: RunSection,

    #[serde(default)]
    pub watch: WatchSection,
}

/// `[log]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogSection {
    /// Overridden by `TESTWATCH_LOG` when that is set.
    #[serde(default)]
    pub level: Option<LogLevel>,
}

/// `[run]` section: what the host runs.
#[derive(Debug, Clone, Deserialize)]
pub struct RunSection {
    /// Primary test path. Delivered to plugins in the `configure` event.
    #[serde(default = "default_run_path")]
    pub path: PathBuf,

    /// Test command, program first. A command given after `--` on the
    /// command line replaces it.
    #[serde(default)]
    pub command: Vec<String>,

    /// Binary used to rerun this invocation. Defaults to the running
    /// executable.
    #[serde(default)]
    pub interpreter: Option<String>,
}

fn default_run_path() -> PathBuf {
    PathBuf::from("tests")
}

impl Default for RunSection {
    fn default() -> Self {
        Self {
            path: default_run_path(),
            command: Vec::new(),
            interpreter: None,
        }
    }
}

/// `[watch]` section: applied to the controller before the run starts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchSection {
    /// Extra paths to track besides `run.path`.
    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// Event kinds, as ids (`0`..`3`) or names. Unsupported values are
    /// dropped; an empty result falls back to `modify`.
    #[serde(default)]
    pub events: Vec<RawEventKind>,

    /// Extra file criteria (regular expressions) besides `\.rs$`.
    #[serde(default)]
    pub criteria: Vec<String>,
}

/// Validated configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub log: LogSection,
    pub run: RunSection,
    pub watch: WatchSection,
}

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = TestwatchError;

    fn try_from(raw: RawConfigFile) -> Result<Self, Self::Error> {
        crate::config::validate::validate_config(&raw)?;
        Ok(Self {
            log: raw.log,
            run: raw.run,
            watch: raw.watch,
        })
    }
}
