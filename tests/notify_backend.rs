// tests/notify_backend.rs

mod common;
use crate::common::{buffered_output, init_tracing, parse_input, watch_definition};

use std::error::Error;
use std::path::PathBuf;

use tokio::time::{sleep, timeout, Duration};

use testwatch::errors::TestwatchError;
use testwatch::types::EventKind;
use testwatch::watch::{build_tracks, kind_accepts, CriteriaMatcher, NotifyBackend, WatchBackend};
use testwatch_test_utils::{with_timeout, RecordingListener};

type TestResult = Result<(), Box<dyn Error>>;

fn ready_backend() -> NotifyBackend {
    let mut backend = NotifyBackend::new();
    backend.set_input(parse_input(&watch_definition(), "testwatch", &["--watch"]));
    let (_buffer, output) = buffered_output();
    backend.set_output(output);
    backend.set_criteria(CriteriaMatcher::new());
    backend
}

#[test]
fn tracks_are_built_per_path_and_kind() {
    let paths = vec![PathBuf::from("does-not-exist-a"), PathBuf::from("does-not-exist-b")];
    let tracks = build_tracks(&paths, &[EventKind::Modify, EventKind::Delete]);

    let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "testwatch.modify.does-not-exist-a",
            "testwatch.delete.does-not-exist-a",
            "testwatch.modify.does-not-exist-b",
            "testwatch.delete.does-not-exist-b",
        ]
    );
}

#[test]
fn kinds_map_onto_notify_events() {
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use notify::EventKind as N;

    assert!(kind_accepts(EventKind::Create, &N::Create(CreateKind::File)));
    assert!(!kind_accepts(EventKind::Create, &N::Modify(ModifyKind::Any)));
    assert!(kind_accepts(EventKind::Modify, &N::Modify(ModifyKind::Any)));
    assert!(kind_accepts(EventKind::Delete, &N::Remove(RemoveKind::File)));
    assert!(kind_accepts(EventKind::All, &N::Remove(RemoveKind::Any)));
    assert!(!kind_accepts(EventKind::All, &N::Any));
}

#[tokio::test]
async fn watch_requires_input_and_output() {
    let mut backend = NotifyBackend::new();
    let mut listener = RecordingListener::new();

    let err = backend
        .watch(&[PathBuf::from(".")], &[EventKind::Modify], &mut listener)
        .await
        .unwrap_err();
    assert!(matches!(err, TestwatchError::ConfigError(_)));
}

#[tokio::test]
async fn missing_path_fails_to_start() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let mut backend = ready_backend();
    let mut listener = RecordingListener::new();

    let missing = dir.path().join("missing");
    let result = with_timeout(backend.watch(&[missing], &[EventKind::Modify], &mut listener)).await;

    assert!(matches!(result, Err(TestwatchError::WatchStartError { .. })));
    assert!(listener.recorded().is_empty());
    Ok(())
}

#[tokio::test]
async fn matching_changes_reach_the_listener() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let root = dir.path().canonicalize()?;
    std::fs::write(root.join("a.rs"), "fn a() {}\n")?;
    std::fs::write(root.join("b.txt"), "b\n")?;

    let mut backend = ready_backend();
    let mut listener = RecordingListener::new();

    let writer_root = root.clone();
    let writer = tokio::spawn(async move {
        sleep(Duration::from_millis(300)).await;
        std::fs::write(writer_root.join("b.txt"), "changed\n")?;
        sleep(Duration::from_millis(100)).await;
        std::fs::write(writer_root.join("a.rs"), "fn a() { let _ = 1; }\n")
    });

    // The session never ends on its own; stop it after the writes settle.
    let session = timeout(
        Duration::from_secs(2),
        backend.watch(&[root.clone()], &[EventKind::Modify], &mut listener),
    )
    .await;
    assert!(session.is_err(), "watch returned early: {session:?}");
    writer.await??;

    let recorded = listener.recorded();
    assert!(recorded.iter().any(|p| p.ends_with("a.rs")), "got: {recorded:?}");
    assert!(!recorded.iter().any(|p| p.ends_with("b.txt")), "got: {recorded:?}");
    Ok(())
}
