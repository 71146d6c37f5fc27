// src/watch/events.rs

//! Event-kind filtering.
//!
//! Callers may request any mix of values; only exact members of
//! [`EventKind::SUPPORTED`] survive. An id must be an integer and a name must
//! be a string: `"1"` is not `Modify`. If nothing survives, the default
//! selection is used, so a watch session always has at least one kind.

use tracing::debug;

use crate::types::{EventKind, RawEventKind};

/// Kinds watched when the caller asks for nothing usable.
pub const DEFAULT_EVENTS: [EventKind; 1] = [EventKind::Modify];

pub fn default_events() -> Vec<EventKind> {
    DEFAULT_EVENTS.to_vec()
}

/// Resolve a single requested value to a supported kind, if it is one.
pub fn supported_kind(raw: &RawEventKind) -> Option<EventKind> {
    match raw {
        RawEventKind::Id(id) => EventKind::from_id(*id),
        RawEventKind::Name(name) => name.parse().ok(),
        RawEventKind::Other(_) => None,
    }
}

/// Filter `requested` down to supported kinds.
///
/// Order and duplicates of the valid members are preserved. Returns
/// [`DEFAULT_EVENTS`] when no member is valid.
pub fn normalize(requested: &[RawEventKind]) -> Vec<EventKind> {
    let kinds: Vec<EventKind> = requested
        .iter()
        .filter_map(|raw| {
            let kind = supported_kind(raw);
            if kind.is_none() {
                debug!(?raw, "dropping unsupported event kind");
            }
            kind
        })
        .collect();

    if kinds.is_empty() {
        debug!("no supported event kinds requested; using defaults");
        return default_events();
    }

    kinds
}
