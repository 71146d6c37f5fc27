// src/watch/registry.rs

use std::path::{Path, PathBuf};

/// Paths to observe, in the order they were tracked.
///
/// Append-only. Tracking the same path twice keeps both entries; the
/// backend decides whether duplicates matter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathRegistry {
    paths: Vec<PathBuf>,
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&mut self, path: impl Into<PathBuf>) {
        self.paths.push(path.into());
    }

    pub fn all(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
