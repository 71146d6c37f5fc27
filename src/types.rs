use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;

use serde::Deserialize;

/// Boxed, sendable future used at the async trait seams (listeners, backends).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Category of filesystem change the watcher can be asked to observe.
///
/// The numeric ids are stable and can be used in config files:
/// `Create = 0`, `Modify = 1`, `Delete = 2`, `All = 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Create,
    Modify,
    Delete,
    All,
}

impl EventKind {
    /// Every supported kind, in id order.
    pub const SUPPORTED: [EventKind; 4] = [
        EventKind::Create,
        EventKind::Modify,
        EventKind::Delete,
        EventKind::All,
    ];

    pub fn id(self) -> i64 {
        match self {
            EventKind::Create => 0,
            EventKind::Modify => 1,
            EventKind::Delete => 2,
            EventKind::All => 3,
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|kind| kind.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            EventKind::Create => "create",
            EventKind::Modify => "modify",
            EventKind::Delete => "delete",
            EventKind::All => "all",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(EventKind::Create),
            "modify" => Ok(EventKind::Modify),
            "delete" => Ok(EventKind::Delete),
            "all" => Ok(EventKind::All),
            other => Err(format!(
                "invalid event kind: {other} (expected \"create\", \"modify\", \"delete\" or \"all\")"
            )),
        }
    }
}

/// An event kind as requested by a caller, before filtering.
///
/// Requests come from config files and plugin setup code, so they may hold
/// ids, names, or values of the wrong type entirely. Only the filter in
/// `watch::events` decides which of them are usable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawEventKind {
    Id(i64),
    Name(String),
    Other(toml::Value),
}

impl From<EventKind> for RawEventKind {
    fn from(kind: EventKind) -> Self {
        RawEventKind::Id(kind.id())
    }
}

impl From<i64> for RawEventKind {
    fn from(id: i64) -> Self {
        RawEventKind::Id(id)
    }
}

impl From<&str> for RawEventKind {
    fn from(name: &str) -> Self {
        RawEventKind::Name(name.to_string())
    }
}

/// Log level as accepted in the `[log]` config section.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
