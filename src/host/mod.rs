// src/host/mod.rs

//! The host test runner's side of the contract.
//!
//! The controller only ever sees the host through these types:
//! - [`LifecycleEmitter`] delivers `configure`, `start` and `end` events.
//! - [`InputDefinition`] / [`Input`] are the option surface and the parsed
//!   invocation.
//! - [`OutputSink`] is where test output goes.
//! - [`SuiteReset`] is the suite state that must be cleared before a rerun.
//!
//! [`suite::run_suite`] is the minimal test pipeline the `testwatch` binary
//! uses to actually run something between `start` and `end`.

use std::path::{Path, PathBuf};

pub mod emitter;
pub mod input;
pub mod output;
pub mod suite;

pub use emitter::{LifecycleEmitter, LifecycleEvent, LifecycleListener, SharedListener, Subscription};
pub use input::{Input, InputDefinition};
pub use output::{BufferedOutput, OutputSink, SharedOutput, StdoutSink};
pub use suite::{run_suite, SuiteLedger, SuiteReset};

/// Payload of the `configure` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    path: PathBuf,
}

impl Configuration {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Primary test path of this run.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Payload of the `start` event: the option surface plugins may extend.
#[derive(Debug, Clone)]
pub struct Environment {
    definition: InputDefinition,
}

impl Environment {
    pub fn new(definition: InputDefinition) -> Self {
        Self { definition }
    }

    pub fn definition(&self) -> &InputDefinition {
        &self.definition
    }

    pub fn definition_mut(&mut self) -> &mut InputDefinition {
        &mut self.definition
    }

    pub fn into_definition(self) -> InputDefinition {
        self.definition
    }
}
