// src/cli.rs

//! Host argument definition.
//!
//! Built with the clap builder API rather than derive: the definition is
//! handed to lifecycle listeners during `start`, and the watch controller
//! adds `--watch` to it before the command line is parsed.

use clap::{Arg, Command};

use crate::config::ConfigFile;
use crate::errors::{Result, TestwatchError};
use crate::host::{Input, InputDefinition};

/// Trailing positional holding the test command.
pub const COMMAND_ARG: &str = "command";

/// The host's own options, before any plugin has extended them.
pub fn definition() -> InputDefinition {
    InputDefinition::new(
        Command::new("testwatch")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Run a test command, optionally rerunning it when watched files change.")
            .arg(
                Arg::new(COMMAND_ARG)
                    .value_name("COMMAND")
                    .num_args(1..)
                    .last(true)
                    .help("Test command to run (replaces run.command from the config file)"),
            ),
    )
}

/// Test command for this invocation: the trailing command if given,
/// otherwise `run.command`.
pub fn test_command(input: &Input, cfg: &ConfigFile) -> Result<Vec<String>> {
    let from_cli = input.values(COMMAND_ARG);
    if !from_cli.is_empty() {
        return Ok(from_cli);
    }
    if !cfg.run.command.is_empty() {
        return Ok(cfg.run.command.clone());
    }
    Err(TestwatchError::ConfigError(
        "no test command: pass one after `--` or set run.command".to_string(),
    ))
}
