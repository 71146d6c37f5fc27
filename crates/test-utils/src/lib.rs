//! Shared helpers for the `testwatch` integration tests.

pub mod builders;
pub mod stub_backend;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;

use anyhow::Context;

use tracing_subscriber::{fmt, EnvFilter};

pub use stub_backend::{CountingReset, RecordingListener, StubBackend};

static TRACING: Once = Once::new();

/// Route `tracing` output through the test harness.
///
/// Output is only shown for failing tests (or with `--nocapture`). `RUST_LOG`
/// picks the filter; without it only the crate's own warnings show up.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("testwatch=warn"));

        // Another test binary helper may already have installed one.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Await `f`, failing the test if it takes longer than five seconds.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    tokio::time::timeout(Duration::from_secs(5), f)
        .await
        .expect("test timed out after 5 seconds")
}

/// Write a shell script into `dir` and return its path as a string.
pub fn write_script(dir: &Path, name: &str, body: &str) -> anyhow::Result<String> {
    let path: PathBuf = dir.join(name);
    std::fs::write(&path, body)
        .with_context(|| format!("writing test script {}", path.display()))?;
    Ok(path.to_string_lossy().into_owned())
}
