use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use testwatch::errors::Result;
use testwatch::host::{Input, SharedOutput, SuiteReset};
use testwatch::types::{BoxFuture, EventKind};
use testwatch::watch::{ChangeListener, CriteriaMatcher, WatchBackend};

/// A backend that:
/// - records everything the controller installs on it
/// - counts `watch` calls
/// - replays a fixed list of changed paths through the criteria and the
///   listener, then returns instead of blocking.
#[derive(Default)]
pub struct StubBackend {
    pub input: Option<Input>,
    pub output: Option<SharedOutput>,
    pub criteria: Option<CriteriaMatcher>,
    pub watch_calls: usize,
    pub watched_paths: Vec<PathBuf>,
    pub watched_events: Vec<EventKind>,
    pub changes: Vec<PathBuf>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths to report as changed once `watch` is called.
    pub fn with_changes<I, P>(mut self, changes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.changes = changes.into_iter().map(Into::into).collect();
        self
    }

    pub fn watched(&self) -> bool {
        self.watch_calls > 0
    }

    pub fn criteria_patterns(&self) -> Vec<String> {
        self.criteria
            .as_ref()
            .map(|c| c.patterns().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

impl WatchBackend for StubBackend {
    fn set_input(&mut self, input: Input) {
        self.input = Some(input);
    }

    fn set_output(&mut self, output: SharedOutput) {
        self.output = Some(output);
    }

    fn set_criteria(&mut self, criteria: CriteriaMatcher) {
        self.criteria = Some(criteria);
    }

    fn watch<'a>(
        &'a mut self,
        paths: &'a [PathBuf],
        events: &'a [EventKind],
        listener: &'a mut dyn ChangeListener,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.watch_calls += 1;
            self.watched_paths = paths.to_vec();
            self.watched_events = events.to_vec();

            let (Some(input), Some(output)) = (self.input.clone(), self.output.clone()) else {
                return Ok(());
            };
            let criteria = self.criteria.clone().unwrap_or_default();

            for change in self.changes.clone() {
                if criteria.matches_path(&change) {
                    listener.on_change(&change, &input, &output).await;
                }
            }
            Ok(())
        })
    }
}

/// Change listener that only records the paths it was called with.
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    pub changes: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<PathBuf> {
        self.changes.lock().unwrap().clone()
    }
}

impl ChangeListener for RecordingListener {
    fn on_change<'a>(
        &'a mut self,
        changed: &'a Path,
        _input: &'a Input,
        _output: &'a SharedOutput,
    ) -> BoxFuture<'a, ()> {
        let changes = Arc::clone(&self.changes);
        let changed = changed.to_path_buf();
        Box::pin(async move {
            changes.lock().unwrap().push(changed);
        })
    }
}

/// Suite reset that counts how often it was asked to reset.
#[derive(Debug, Default)]
pub struct CountingReset {
    resets: AtomicUsize,
}

impl CountingReset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resets(&self) -> usize {
        self.resets.load(Ordering::SeqCst)
    }
}

impl SuiteReset for CountingReset {
    fn reset(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}
