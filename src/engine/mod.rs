// src/engine/mod.rs

//! Watch-lifecycle orchestration.
//!
//! [`WatchController`] listens to the host's lifecycle events, accumulates a
//! [`WatchConfiguration`] while the host configures and runs, and at the end
//! of a run (if `--watch` was given) hands a snapshot of it to the watch
//! backend with a rerun listener attached.

pub mod controller;

pub use controller::{listen, WatchController, WatchSession};

use std::path::PathBuf;

use crate::errors::Result;
use crate::types::{EventKind, RawEventKind};
use crate::watch::{default_events, normalize, CriteriaMatcher, PathRegistry};

/// Name of the switch the controller registers on the host.
pub const WATCH_FLAG: &str = "watch";

/// Help text shown for [`WATCH_FLAG`].
pub const WATCH_FLAG_HELP: &str = "Watch files for changes and rerun tests";

/// Where the controller is in the host's run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Constructed and subscribed; nothing received yet.
    Idle,
    /// At least one configuration has been received.
    Configuring,
    /// The run has started and the watch flag is registered.
    Running,
    /// A watch session is active and waiting for changes.
    Watching,
    /// A rerun triggered by a change is in progress.
    Rerunning,
    /// The run ended without watching, or the watch session finished.
    Terminated,
}

/// Everything the controller accumulates before a watch session starts.
///
/// `events` is never empty and `criteria` starts with the default pattern.
#[derive(Debug, Clone)]
pub struct WatchConfiguration {
    paths: PathRegistry,
    events: Vec<EventKind>,
    criteria: CriteriaMatcher,
}

impl Default for WatchConfiguration {
    fn default() -> Self {
        Self {
            paths: PathRegistry::new(),
            events: default_events(),
            criteria: CriteriaMatcher::new(),
        }
    }
}

impl WatchConfiguration {
    pub fn track(&mut self, path: impl Into<PathBuf>) {
        self.paths.track(path);
    }

    pub fn paths(&self) -> &PathRegistry {
        &self.paths
    }

    /// Replace the watched kinds with the supported subset of `requested`.
    pub fn set_events(&mut self, requested: &[RawEventKind]) {
        self.events = normalize(requested);
    }

    pub fn events(&self) -> &[EventKind] {
        &self.events
    }

    pub fn add_criteria(&mut self, pattern: &str) -> Result<()> {
        self.criteria.add(pattern)
    }

    pub fn criteria(&self) -> &CriteriaMatcher {
        &self.criteria
    }
}
