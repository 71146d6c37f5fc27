// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod host;
pub mod logging;
pub mod types;
pub mod watch;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::{load_config, ConfigFile};
use crate::engine::{listen, WatchController};
use crate::errors::Result;
use crate::exec::RerunExecutor;
use crate::host::{
    run_suite, Configuration, Environment, Input, LifecycleEmitter, SharedOutput, StdoutSink,
    SuiteLedger, SuiteReset,
};

/// High-level entry point used by `main.rs`.
///
/// Plays the host test runner around a watch controller:
/// - load config, start logging
/// - subscribe the controller, emit `configure` and `start`
/// - parse the invocation against the (now extended) definition
/// - run the test command, emit `end`
///
/// With `--watch`, `end` does not return until the process is stopped.
/// Returns the exit code of the test command.
pub async fn run(interpreter: String, args: Vec<String>) -> Result<i32> {
    let cfg = load_config()?;
    logging::init_logging(cfg.log.level)?;

    let output: SharedOutput = Arc::new(StdoutSink);
    let ledger = Arc::new(SuiteLedger::new());

    let controller = Arc::new(Mutex::new(build_controller(&cfg, ledger.clone())?));
    let mut emitter = LifecycleEmitter::new();
    listen(&controller, &mut emitter);

    emitter
        .emit_configure(&Configuration::new(cfg.run.path.clone()))
        .await;

    let mut environment = Environment::new(cli::definition());
    emitter.emit_start(&mut environment).await;

    let interpreter = cfg.run.interpreter.clone().unwrap_or(interpreter);
    let input = Input::parse(environment.definition(), interpreter, args)?;

    let command = cli::test_command(&input, &cfg)?;
    let exit_code = run_suite(&command, &output, &ledger).await?;
    info!(exit_code, runs = ledger.runs(), "run complete");

    emitter.emit_end(exit_code, &input, &output).await?;
    Ok(exit_code)
}

/// Notify-backed controller with the `[watch]` section applied.
pub fn build_controller(cfg: &ConfigFile, reset: Arc<dyn SuiteReset>) -> Result<WatchController> {
    let rerun = RerunExecutor::new().with_reset(reset);
    let mut controller = WatchController::new(rerun);

    for path in &cfg.watch.paths {
        controller.track(path.clone());
    }
    if !cfg.watch.events.is_empty() {
        controller.set_events(&cfg.watch.events);
        debug!(
            requested = ?cfg.watch.events,
            resolved = ?controller.events(),
            "resolved configured watch events"
        );
    }
    for pattern in &cfg.watch.criteria {
        controller.add_criteria(pattern)?;
    }

    Ok(controller)
}
