// src/host/input.rs

use clap::{Arg, ArgAction, ArgMatches, Command};

/// Mutable argument definition the host parses its invocation against.
///
/// Wraps a `clap::Command` so plugins can register options before the
/// command line is parsed.
#[derive(Debug, Clone)]
pub struct InputDefinition {
    command: Command,
}

impl InputDefinition {
    pub fn new(command: Command) -> Self {
        Self { command }
    }

    /// Register a `--<name>` switch: takes no value, defaults to false.
    pub fn add_flag(&mut self, name: &'static str, help: &'static str) {
        if self.has_option(name) {
            return;
        }
        let command = std::mem::take(&mut self.command);
        self.command = command.arg(
            Arg::new(name)
                .long(name)
                .action(ArgAction::SetTrue)
                .help(help),
        );
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.command.get_arguments().any(|arg| arg.get_id() == name)
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

/// A parsed invocation of the host.
///
/// Keeps the interpreter and raw arguments next to the clap matches so the
/// same invocation can be reproduced for a rerun.
#[derive(Debug, Clone)]
pub struct Input {
    interpreter: String,
    args: Vec<String>,
    matches: ArgMatches,
}

impl Input {
    /// Parse `args` (without the program name) against `definition`.
    pub fn parse<I, S>(
        definition: &InputDefinition,
        interpreter: impl Into<String>,
        args: I,
    ) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let interpreter = interpreter.into();
        let args: Vec<String> = args.into_iter().map(Into::into).collect();

        let matches = definition
            .command()
            .clone()
            .try_get_matches_from(std::iter::once(interpreter.clone()).chain(args.iter().cloned()))?;

        Ok(Self {
            interpreter,
            args,
            matches,
        })
    }

    /// Value of a boolean switch. False if the switch was never defined.
    pub fn flag(&self, name: &str) -> bool {
        self.matches
            .try_get_one::<bool>(name)
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false)
    }

    /// All values of a multi-valued string argument.
    pub fn values(&self, name: &str) -> Vec<String> {
        self.matches
            .try_get_many::<String>(name)
            .ok()
            .flatten()
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default()
    }

    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Replace the binary used to reproduce this invocation.
    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    pub fn matches(&self) -> &ArgMatches {
        &self.matches
    }
}
