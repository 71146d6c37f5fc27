// src/host/suite.rs

//! Host-side test pipeline: run the configured test command once.

use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use anyhow::{anyhow, Context};
use tokio::process::Command;
use tracing::info;

use crate::errors::Result;
use crate::exec::stream::pipe_output;
use crate::host::SharedOutput;

/// Suite state that must be cleared before a rerun starts.
pub trait SuiteReset: Send + Sync {
    fn reset(&self);
}

/// Results the host has recorded for this process.
#[derive(Debug, Default)]
pub struct SuiteLedger {
    runs: AtomicUsize,
    reruns: AtomicUsize,
    last_exit_code: Mutex<Option<i32>>,
}

impl SuiteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, exit_code: i32) {
        self.runs.fetch_add(1, Ordering::SeqCst);
        *self
            .last_exit_code
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(exit_code);
    }

    /// Suites run in this process.
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    /// Reruns started since the first run.
    pub fn reruns(&self) -> usize {
        self.reruns.load(Ordering::SeqCst)
    }

    /// Exit code of the current result, if it has not been reset.
    pub fn last_exit_code(&self) -> Option<i32> {
        *self
            .last_exit_code
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl SuiteReset for SuiteLedger {
    fn reset(&self) {
        self.reruns.fetch_add(1, Ordering::SeqCst);
        *self
            .last_exit_code
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Run `command` to completion, streaming its output to `output`.
///
/// Returns the exit code (-1 when killed by a signal) and records it in
/// `ledger`.
pub async fn run_suite(command: &[String], output: &SharedOutput, ledger: &SuiteLedger) -> Result<i32> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| anyhow!("no test command to run"))?;

    info!(cmd = %command.join(" "), "starting test suite");

    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("spawning test command '{}'", command.join(" ")))?;

    pipe_output(&mut child, output).await?;

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for test command '{}'", command.join(" ")))?;

    let code = status.code().unwrap_or(-1);
    info!(exit_code = code, success = status.success(), "test suite finished");

    ledger.record(code);
    Ok(code)
}
