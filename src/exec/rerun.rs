// src/exec/rerun.rs

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::errors::{Result, TestwatchError};
use crate::exec::command::RerunCommand;
use crate::exec::stream::pipe_output;
use crate::host::{Input, SharedOutput, SuiteReset};
use crate::types::BoxFuture;
use crate::watch::ChangeListener;

/// Flag removed from the original invocation before rerunning it.
pub const DEFAULT_STRIP_FLAG: &str = "--watch";

/// Re-executes the original invocation in a child process and mirrors its
/// output.
///
/// The child's exit status is logged but not interpreted; failures are
/// visible through the streamed output only.
pub struct RerunExecutor {
    strip_flag: String,
    reset: Option<Arc<dyn SuiteReset>>,
    reruns: usize,
}

impl std::fmt::Debug for RerunExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RerunExecutor")
            .field("strip_flag", &self.strip_flag)
            .field("reruns", &self.reruns)
            .finish_non_exhaustive()
    }
}

impl Default for RerunExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl RerunExecutor {
    pub fn new() -> Self {
        Self {
            strip_flag: DEFAULT_STRIP_FLAG.to_string(),
            reset: None,
            reruns: 0,
        }
    }

    /// Suite state to clear before every rerun.
    pub fn with_reset(mut self, reset: Arc<dyn SuiteReset>) -> Self {
        self.reset = Some(reset);
        self
    }

    pub fn with_strip_flag(mut self, flag: impl Into<String>) -> Self {
        self.strip_flag = flag.into();
        self
    }

    /// Reruns started so far, including ones that failed to spawn.
    pub fn reruns(&self) -> usize {
        self.reruns
    }

    pub fn command_for(&self, input: &Input) -> RerunCommand {
        RerunCommand::from_invocation(input.interpreter(), input.args(), &self.strip_flag)
    }

    /// Rerun `input` and stream the output to `output`.
    ///
    /// A child that cannot be started is reported on `output` instead of
    /// being returned, so the watch session keeps going.
    pub async fn run(&mut self, input: &Input, output: &SharedOutput) {
        self.reruns += 1;
        if let Some(reset) = &self.reset {
            reset.reset();
        }

        let command = self.command_for(input);
        info!(rerun = self.reruns, cmd = %command, "rerunning tests");

        if let Err(err) = execute(&command, output).await {
            error!(cmd = %command, error = %err, "rerun failed");
            if let Err(write_err) = output.writeln(&format!("[testwatch] {err}")) {
                error!(error = %write_err, "failed to report rerun failure");
            }
        }
    }
}

/// Spawn `command`, stream its output, and wait for it to exit.
pub async fn execute(command: &RerunCommand, output: &SharedOutput) -> Result<()> {
    let mut child = command
        .to_command()
        .spawn()
        .map_err(|source| TestwatchError::RerunSpawnError {
            command: command.to_string(),
            source,
        })?;

    pipe_output(&mut child, output).await?;

    let status = child.wait().await?;
    debug!(cmd = %command, ?status, "rerun process exited");
    Ok(())
}

impl ChangeListener for RerunExecutor {
    fn on_change<'a>(
        &'a mut self,
        changed: &'a Path,
        input: &'a Input,
        output: &'a SharedOutput,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            debug!(path = %changed.display(), "change triggered rerun");
            self.run(input, output).await;
        })
    }
}
