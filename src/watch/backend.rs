// src/watch/backend.rs

//! Pluggable watch backend abstraction.
//!
//! The controller talks to a `WatchBackend` instead of `notify` directly.
//! Production code uses [`NotifyBackend`](super::NotifyBackend); tests swap in
//! a stub that records what it was given and replays canned changes.

use std::path::{Path, PathBuf};

use crate::errors::Result;
use crate::host::{Input, SharedOutput};
use crate::types::{BoxFuture, EventKind};
use crate::watch::criteria::CriteriaMatcher;

/// Receives qualifying changes from a backend.
///
/// The backend awaits `on_change` before looking at the next change, so a
/// listener that runs a whole test suite keeps the session paused meanwhile.
pub trait ChangeListener: Send {
    fn on_change<'a>(
        &'a mut self,
        changed: &'a Path,
        input: &'a Input,
        output: &'a SharedOutput,
    ) -> BoxFuture<'a, ()>;
}

/// Source of filesystem change notifications.
pub trait WatchBackend: Send {
    /// Invocation handed to the listener on every change.
    fn set_input(&mut self, input: Input);

    /// Output sink handed to the listener on every change.
    fn set_output(&mut self, output: SharedOutput);

    /// Patterns a changed path must satisfy before the listener runs.
    fn set_criteria(&mut self, criteria: CriteriaMatcher);

    /// Observe every path in `paths` for every kind in `events`, calling
    /// `listener` once per qualifying change.
    ///
    /// Does not return during normal operation. Errors setting up the
    /// underlying watch are returned immediately.
    fn watch<'a>(
        &'a mut self,
        paths: &'a [PathBuf],
        events: &'a [EventKind],
        listener: &'a mut dyn ChangeListener,
    ) -> BoxFuture<'a, Result<()>>;
}
