// src/engine/controller.rs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::engine::{ControllerState, WatchConfiguration, WATCH_FLAG, WATCH_FLAG_HELP};
use crate::errors::Result;
use crate::exec::RerunExecutor;
use crate::host::{
    Configuration, Environment, Input, LifecycleEmitter, LifecycleEvent, LifecycleListener,
    SharedListener, SharedOutput, Subscription,
};
use crate::types::{BoxFuture, EventKind, RawEventKind};
use crate::watch::{ChangeListener, CriteriaMatcher, NotifyBackend, WatchBackend};

/// Snapshot of a [`WatchConfiguration`] taken when a session starts.
///
/// Later changes to the controller's configuration do not reach a session
/// that is already running.
#[derive(Debug, Clone)]
pub struct WatchSession {
    pub paths: Vec<PathBuf>,
    pub events: Vec<EventKind>,
    pub criteria: CriteriaMatcher,
}

impl WatchSession {
    pub fn from_config(config: &WatchConfiguration) -> Self {
        Self {
            paths: config.paths().all().to_vec(),
            events: config.events().to_vec(),
            criteria: config.criteria().clone(),
        }
    }
}

/// Lifecycle listener that turns a finished run into a watch session.
///
/// - `configure`: tracks the configured path.
/// - `start`: registers `--watch` on the host's definition.
/// - `end`: unsubscribes itself, then watches if `--watch` was given.
pub struct WatchController<B = NotifyBackend> {
    config: WatchConfiguration,
    backend: B,
    rerun: RerunExecutor,
    state: ControllerState,
}

impl<B> std::fmt::Debug for WatchController<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchController")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl WatchController<NotifyBackend> {
    /// Controller backed by the `notify` watcher.
    pub fn new(rerun: RerunExecutor) -> Self {
        Self::with_backend(NotifyBackend::new(), rerun)
    }
}

impl<B: WatchBackend> WatchController<B> {
    pub fn with_backend(backend: B, rerun: RerunExecutor) -> Self {
        Self {
            config: WatchConfiguration::default(),
            backend,
            rerun,
            state: ControllerState::Idle,
        }
    }

    /// Add a path to observe once watching starts.
    pub fn track(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        debug!(path = %path.display(), "tracking path");
        self.config.track(path);
    }

    pub fn tracked_paths(&self) -> &[PathBuf] {
        self.config.paths().all()
    }

    pub fn set_events(&mut self, requested: &[RawEventKind]) {
        self.config.set_events(requested);
        debug!(events = ?self.config.events(), "watch events set");
    }

    pub fn events(&self) -> &[EventKind] {
        self.config.events()
    }

    pub fn add_criteria(&mut self, pattern: &str) -> Result<()> {
        self.config.add_criteria(pattern)
    }

    pub fn criteria(&self) -> &CriteriaMatcher {
        self.config.criteria()
    }

    pub fn configuration(&self) -> &WatchConfiguration {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn rerun(&self) -> &RerunExecutor {
        &self.rerun
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Start a watch session from the current configuration.
    ///
    /// Installs `input`, `output` and the criteria on the backend and waits
    /// on it. Returns only when the backend stops or fails to start.
    pub async fn watch(&mut self, input: &Input, output: &SharedOutput) -> Result<()> {
        let session = WatchSession::from_config(&self.config);

        self.backend.set_input(input.clone());
        self.backend.set_output(Arc::clone(output));
        self.backend.set_criteria(session.criteria.clone());

        info!(
            paths = ?session.paths,
            events = ?session.events,
            "starting watch session"
        );
        self.state = ControllerState::Watching;

        let mut listener = SessionListener {
            rerun: &mut self.rerun,
            state: &mut self.state,
        };
        let result = self
            .backend
            .watch(&session.paths, &session.events, &mut listener)
            .await;

        self.state = ControllerState::Terminated;
        result
    }
}

impl<B: WatchBackend> LifecycleListener for WatchController<B> {
    fn on_configure(&mut self, configuration: &Configuration) {
        self.state = ControllerState::Configuring;
        self.track(configuration.path());
    }

    fn on_start(&mut self, environment: &mut Environment) {
        environment.definition_mut().add_flag(WATCH_FLAG, WATCH_FLAG_HELP);
        self.state = ControllerState::Running;
    }

    fn on_end<'a>(
        &'a mut self,
        subscription: &'a Subscription,
        exit_code: i32,
        input: &'a Input,
        output: &'a SharedOutput,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            subscription.unsubscribe();

            if !input.flag(WATCH_FLAG) {
                debug!(exit_code, "watch not requested");
                self.state = ControllerState::Terminated;
                return Ok(());
            }

            info!(exit_code, "run finished; watching for changes");
            self.watch(input, output).await
        })
    }
}

/// Subscribe `controller` to all three lifecycle events on `emitter`.
pub fn listen<B>(controller: &Arc<Mutex<WatchController<B>>>, emitter: &mut LifecycleEmitter) -> Vec<Subscription>
where
    B: WatchBackend + 'static,
{
    let listener: SharedListener = controller.clone();
    [
        LifecycleEvent::Configure,
        LifecycleEvent::Start,
        LifecycleEvent::End,
    ]
    .into_iter()
    .map(|event| emitter.subscribe(event, Arc::clone(&listener)))
    .collect()
}

/// Change listener for a single session: marks the controller as
/// rerunning while the executor runs.
struct SessionListener<'s> {
    rerun: &'s mut RerunExecutor,
    state: &'s mut ControllerState,
}

impl ChangeListener for SessionListener<'_> {
    fn on_change<'a>(
        &'a mut self,
        changed: &'a Path,
        input: &'a Input,
        output: &'a SharedOutput,
    ) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            *self.state = ControllerState::Rerunning;
            self.rerun.on_change(changed, input, output).await;
            *self.state = ControllerState::Watching;
        })
    }
}
