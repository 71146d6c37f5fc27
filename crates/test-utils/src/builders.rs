#![allow(dead_code)]

use std::path::PathBuf;

use testwatch::config::{ConfigFile, RawConfigFile};
use testwatch::types::RawEventKind;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn with_run_path(mut self, path: &str) -> Self {
        self.config.run.path = PathBuf::from(path);
        self
    }

    pub fn with_command(mut self, command: &[&str]) -> Self {
        self.config.run.command = command.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_interpreter(mut self, interpreter: &str) -> Self {
        self.config.run.interpreter = Some(interpreter.to_string());
        self
    }

    pub fn with_watch_path(mut self, path: &str) -> Self {
        self.config.watch.paths.push(PathBuf::from(path));
        self
    }

    pub fn with_event(mut self, event: impl Into<RawEventKind>) -> Self {
        self.config.watch.events.push(event.into());
        self
    }

    pub fn with_criteria(mut self, pattern: &str) -> Self {
        self.config.watch.criteria.push(pattern.to_string());
        self
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
