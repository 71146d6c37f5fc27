// src/host/output.rs

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Where the host (and every rerun) writes test output.
pub trait OutputSink: Send + Sync {
    fn write(&self, bytes: &[u8]) -> io::Result<()>;

    fn writeln(&self, line: &str) -> io::Result<()> {
        self.write(line.as_bytes())?;
        self.write(b"\n")
    }
}

pub type SharedOutput = Arc<dyn OutputSink>;

/// Writes straight to the process stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()
    }
}

/// Collects everything in memory.
#[derive(Debug, Default)]
pub struct BufferedOutput {
    buf: Mutex<Vec<u8>>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    /// Everything written so far, exactly as written.
    pub fn bytes(&self) -> Vec<u8> {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl OutputSink for BufferedOutput {
    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(bytes);
        Ok(())
    }
}
