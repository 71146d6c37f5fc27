// src/watch/watcher.rs

use std::collections::HashSet;
use std::path::PathBuf;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::errors::{Result, TestwatchError};
use crate::host::{Input, SharedOutput};
use crate::types::{BoxFuture, EventKind};
use crate::watch::backend::{ChangeListener, WatchBackend};
use crate::watch::criteria::CriteriaMatcher;
use crate::watch::path_utils::is_within;

/// One registration of a path for one event kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub root: PathBuf,
    pub kind: EventKind,
}

impl Track {
    fn accepts(&self, event_kind: &notify::EventKind, path: &std::path::Path) -> bool {
        kind_accepts(self.kind, event_kind) && is_within(&self.root, path)
    }
}

/// Build one track per (path, kind) pair.
///
/// Roots are canonicalized when possible so they compare cleanly against the
/// absolute paths `notify` reports.
pub fn build_tracks(paths: &[PathBuf], events: &[EventKind]) -> Vec<Track> {
    let mut tracks = Vec::with_capacity(paths.len() * events.len());
    for path in paths {
        let root = path.canonicalize().unwrap_or_else(|_| path.clone());
        for kind in events {
            tracks.push(Track {
                id: format!("testwatch.{kind}.{}", path.display()),
                root: root.clone(),
                kind: *kind,
            });
        }
    }
    tracks
}

/// Whether a `notify` event kind belongs to the given watch category.
pub fn kind_accepts(kind: EventKind, event_kind: &notify::EventKind) -> bool {
    use notify::EventKind as N;

    match kind {
        EventKind::Create => matches!(event_kind, N::Create(_)),
        EventKind::Modify => matches!(event_kind, N::Modify(_)),
        EventKind::Delete => matches!(event_kind, N::Remove(_)),
        EventKind::All => matches!(event_kind, N::Create(_) | N::Modify(_) | N::Remove(_)),
    }
}

/// Reference backend on top of `notify::RecommendedWatcher`.
///
/// Events arrive on notify's own thread and are forwarded over an unbounded
/// channel into the `watch` future, which is the only place that waits.
pub struct NotifyBackend {
    input: Option<Input>,
    output: Option<SharedOutput>,
    criteria: CriteriaMatcher,
}

impl std::fmt::Debug for NotifyBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifyBackend")
            .field("criteria", &self.criteria)
            .finish_non_exhaustive()
    }
}

impl Default for NotifyBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyBackend {
    pub fn new() -> Self {
        Self {
            input: None,
            output: None,
            criteria: CriteriaMatcher::new(),
        }
    }

    pub fn criteria(&self) -> &CriteriaMatcher {
        &self.criteria
    }

    /// First path of `event` that a track accepts and the criteria match.
    fn qualifying_path(&self, tracks: &[Track], event: &Event) -> Option<PathBuf> {
        event
            .paths
            .iter()
            .find(|path| {
                let Some(track) = tracks.iter().find(|t| t.accepts(&event.kind, path)) else {
                    return false;
                };
                if !self.criteria.matches_path(path) {
                    debug!(track = %track.id, ?path, "change does not match file criteria");
                    return false;
                }
                debug!(track = %track.id, ?path, "change matched");
                true
            })
            .cloned()
    }
}

impl WatchBackend for NotifyBackend {
    fn set_input(&mut self, input: Input) {
        self.input = Some(input);
    }

    fn set_output(&mut self, output: SharedOutput) {
        self.output = Some(output);
    }

    fn set_criteria(&mut self, criteria: CriteriaMatcher) {
        self.criteria = criteria;
    }

    fn watch<'a>(
        &'a mut self,
        paths: &'a [PathBuf],
        events: &'a [EventKind],
        listener: &'a mut dyn ChangeListener,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let (Some(input), Some(output)) = (self.input.clone(), self.output.clone()) else {
                return Err(TestwatchError::ConfigError(
                    "watch started before input and output were set".to_string(),
                ));
            };

            let tracks = build_tracks(paths, events);

            // Channel from the blocking notify callback into the async world.
            let (event_tx, mut event_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();

            let mut watcher = RecommendedWatcher::new(
                move |res: notify::Result<Event>| {
                    // The receiver only goes away when the session ends.
                    let _ = event_tx.send(res);
                },
                Config::default(),
            )
            .map_err(TestwatchError::WatcherUnavailable)?;

            let mut registered = HashSet::new();
            for track in &tracks {
                if registered.insert(track.root.clone()) {
                    watcher
                        .watch(&track.root, RecursiveMode::Recursive)
                        .map_err(|source| TestwatchError::WatchStartError {
                            path: track.root.clone(),
                            source,
                        })?;
                }
                debug!(track = %track.id, "registered track");
            }

            info!(
                paths = ?paths,
                events = ?events,
                criteria = ?self.criteria,
                "watching for changes"
            );

            while let Some(res) = event_rx.recv().await {
                let event = match res {
                    Ok(event) => event,
                    Err(err) => {
                        warn!(error = %err, "file watch error");
                        continue;
                    }
                };
                debug!(?event, "received notify event");

                let Some(changed) = self.qualifying_path(&tracks, &event) else {
                    continue;
                };

                // A single save usually produces a burst of events; everything
                // already queued belongs to this change.
                let coalesced = drain_pending(&mut event_rx);
                if coalesced > 0 {
                    debug!(coalesced, "coalesced queued events into this change");
                }

                info!(path = %changed.display(), "change detected");
                listener.on_change(&changed, &input, &output).await;
            }

            debug!("file watcher loop ended");
            Ok(())
        })
    }
}

fn drain_pending(rx: &mut mpsc::UnboundedReceiver<notify::Result<Event>>) -> usize {
    let mut drained = 0;
    while rx.try_recv().is_ok() {
        drained += 1;
    }
    drained
}
