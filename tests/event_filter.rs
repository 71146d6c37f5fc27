// tests/event_filter.rs

use proptest::prelude::*;

use testwatch::engine::WatchConfiguration;
use testwatch::types::{EventKind, RawEventKind};
use testwatch::watch::events::supported_kind;
use testwatch::watch::{default_events, normalize};

#[test]
fn default_selection_is_modify_only() {
    assert_eq!(default_events(), vec![EventKind::Modify]);
    assert_eq!(WatchConfiguration::default().events(), &[EventKind::Modify]);
}

#[test]
fn supported_members_keep_order_and_duplicates() {
    let requested = vec![
        RawEventKind::from(EventKind::Delete),
        RawEventKind::from(EventKind::Create),
        RawEventKind::from(EventKind::Delete),
    ];

    assert_eq!(
        normalize(&requested),
        vec![EventKind::Delete, EventKind::Create, EventKind::Delete]
    );
}

#[test]
fn unsupported_members_are_dropped() {
    let requested = vec![
        RawEventKind::Id(1),
        RawEventKind::Id(42),
        RawEventKind::from("create"),
        RawEventKind::from("rename"),
    ];

    assert_eq!(normalize(&requested), vec![EventKind::Modify, EventKind::Create]);
}

#[test]
fn numeric_strings_are_not_ids() {
    assert_eq!(supported_kind(&RawEventKind::from("1")), None);
    assert_eq!(supported_kind(&RawEventKind::Id(1)), Some(EventKind::Modify));

    // Nothing valid left, so the defaults apply.
    assert_eq!(normalize(&[RawEventKind::from("0")]), default_events());
}

#[test]
fn names_must_match_exactly() {
    assert_eq!(supported_kind(&RawEventKind::from("delete")), Some(EventKind::Delete));
    assert_eq!(supported_kind(&RawEventKind::from(" DELETE ")), None);
    assert_eq!(supported_kind(&RawEventKind::from("Modify")), None);
    assert_eq!(supported_kind(&RawEventKind::from("all ")), None);

    assert_eq!(
        normalize(&[RawEventKind::from(" DELETE "), RawEventKind::from("Modify")]),
        default_events()
    );
}

#[test]
fn empty_or_invalid_request_falls_back_to_defaults() {
    assert_eq!(normalize(&[]), default_events());
    assert_eq!(
        normalize(&[
            RawEventKind::Id(-1),
            RawEventKind::Other(toml::Value::Boolean(true)),
        ]),
        default_events()
    );
}

#[test]
fn set_events_replaces_previous_selection() {
    let mut config = WatchConfiguration::default();
    config.set_events(&[RawEventKind::from(EventKind::All)]);
    assert_eq!(config.events(), &[EventKind::All]);

    config.set_events(&[RawEventKind::from("bogus")]);
    assert_eq!(config.events(), &[EventKind::Modify]);
}

fn raw_event_strategy() -> impl Strategy<Value = RawEventKind> {
    prop_oneof![
        (-3i64..8).prop_map(RawEventKind::Id),
        "[a-zA-Z0-9]{0,8}".prop_map(RawEventKind::Name),
        prop_oneof![
            Just(toml::Value::Boolean(false)),
            Just(toml::Value::Float(1.0)),
        ]
        .prop_map(RawEventKind::Other),
    ]
}

proptest! {
    #[test]
    fn normalized_events_are_never_empty_and_always_supported(
        requested in proptest::collection::vec(raw_event_strategy(), 0..12)
    ) {
        let kinds = normalize(&requested);

        prop_assert!(!kinds.is_empty());
        for kind in &kinds {
            prop_assert!(EventKind::SUPPORTED.contains(kind));
        }
    }

    #[test]
    fn normalized_events_are_the_valid_subsequence(
        requested in proptest::collection::vec(raw_event_strategy(), 0..12)
    ) {
        let valid: Vec<EventKind> = requested.iter().filter_map(supported_kind).collect();
        let kinds = normalize(&requested);

        if valid.is_empty() {
            prop_assert_eq!(kinds, default_events());
        } else {
            prop_assert_eq!(kinds, valid);
        }
    }
}
