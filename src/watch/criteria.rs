// src/watch/criteria.rs

use std::fmt;
use std::path::Path;

use regex::Regex;

use crate::errors::{Result, TestwatchError};
use crate::watch::path_utils::normalized_str;

/// Pattern every matcher starts with: Rust source files.
pub const DEFAULT_CRITERIA: &str = r"\.rs$";

/// Ordered list of file-name patterns deciding whether a changed path is
/// interesting enough to rerun the suite.
///
/// Patterns use `regex` syntax and are searched against the whole path
/// string (forward slashes on every platform), so anchor them yourself.
#[derive(Clone)]
pub struct CriteriaMatcher {
    patterns: Vec<Regex>,
}

impl fmt::Debug for CriteriaMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.patterns()).finish()
    }
}

impl Default for CriteriaMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CriteriaMatcher {
    /// Matcher holding only [`DEFAULT_CRITERIA`].
    pub fn new() -> Self {
        let default = Regex::new(DEFAULT_CRITERIA).expect("default criteria is a valid regex");
        Self {
            patterns: vec![default],
        }
    }

    /// Matcher with no patterns at all; it matches nothing.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Append a pattern. Fails only if it does not compile.
    pub fn add(&mut self, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern).map_err(|source| TestwatchError::InvalidCriteria {
            pattern: pattern.to_string(),
            source,
        })?;
        self.patterns.push(regex);
        Ok(())
    }

    /// True if any pattern matches `path`.
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(path))
    }

    pub fn matches_path(&self, path: &Path) -> bool {
        self.matches(&normalized_str(path))
    }

    /// Source text of each pattern, in insertion order.
    pub fn patterns(&self) -> Vec<&str> {
        self.patterns.iter().map(Regex::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
