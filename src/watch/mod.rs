// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Filtering requested event kinds down to the supported set (`events`).
//! - Deciding which changed files are interesting (`criteria`).
//! - Accumulating the paths to observe (`registry`).
//! - The backend seam (`backend`) and its `notify` implementation
//!   (`watcher`).
//!
//! It does **not** know how a rerun is performed; it only turns filesystem
//! changes into listener calls.

pub mod backend;
pub mod criteria;
pub mod events;
pub mod path_utils;
pub mod registry;
pub mod watcher;

pub use backend::{ChangeListener, WatchBackend};
pub use criteria::{CriteriaMatcher, DEFAULT_CRITERIA};
pub use events::{default_events, normalize, DEFAULT_EVENTS};
pub use registry::PathRegistry;
pub use watcher::{build_tracks, kind_accepts, NotifyBackend, Track};
