// src/exec/stream.rs

//! Streaming child output into an [`OutputSink`](crate::host::OutputSink).
//!
//! Output is forwarded as raw bytes, chunk by chunk, so invalid UTF-8,
//! carriage-return progress lines and a missing final newline all reach the
//! sink unchanged. Only escaped color codes are rewritten.

use std::borrow::Cow;
use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;

use crate::errors::Result;
use crate::host::SharedOutput;

const READ_CHUNK: usize = 8 * 1024;

/// Longest digit run still held back as a possibly incomplete escape.
const MAX_ESCAPE_DIGITS: usize = 8;

/// `\[<n>m` as it appears once a color code has lost its ESC byte.
static ESCAPED_SGR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\[(\d+)m").expect("escape pattern is a valid regex"));

static ESCAPED_SGR_BYTES: LazyLock<regex::bytes::Regex> = LazyLock::new(|| {
    regex::bytes::Regex::new(r"\\\[([0-9]+)m").expect("escape pattern is a valid regex")
});

/// Turn literal `\[<n>m` sequences back into `ESC[<n>m`.
pub fn restore_escapes(line: &str) -> Cow<'_, str> {
    ESCAPED_SGR.replace_all(line, "\x1b[${1}m")
}

/// Byte-level [`restore_escapes`]; anything that is not UTF-8 passes through.
pub fn restore_escape_bytes(chunk: &[u8]) -> Cow<'_, [u8]> {
    ESCAPED_SGR_BYTES.replace_all(chunk, &b"\x1b[${1}m"[..])
}

/// Copy the child's stdout and stderr into `output` as the bytes arrive,
/// restoring color escapes on the way.
///
/// Returns once both streams are closed. Does not wait for the child.
pub async fn pipe_output(child: &mut Child, output: &SharedOutput) -> Result<()> {
    let mut stdout = child.stdout.take().map(ChunkReader::new);
    let mut stderr = child.stderr.take().map(ChunkReader::new);

    while stdout.is_some() || stderr.is_some() {
        let (source, chunk) = tokio::select! {
            chunk = next_chunk(&mut stdout), if stdout.is_some() => ("stdout", chunk),
            chunk = next_chunk(&mut stderr), if stderr.is_some() => ("stderr", chunk),
        };

        match chunk.with_context(|| format!("reading child {source}"))? {
            Some(bytes) => output.write(&restore_escape_bytes(&bytes))?,
            None if source == "stdout" => stdout = None,
            None => stderr = None,
        }
    }

    Ok(())
}

/// Reads a pipe in chunks, holding back a trailing `\[<digits>` that may be
/// completed by the next read.
struct ChunkReader<R> {
    reader: R,
    buf: Vec<u8>,
    pending: Vec<u8>,
}

impl<R: AsyncRead + Unpin> ChunkReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: vec![0; READ_CHUNK],
            pending: Vec::new(),
        }
    }

    /// Next non-empty chunk, or `None` at end of stream.
    ///
    /// Cancel-safe: the only await point is the read itself, and held bytes
    /// live in `self`.
    async fn next(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        loop {
            let n = self.reader.read(&mut self.buf).await?;
            if n == 0 {
                if self.pending.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(std::mem::take(&mut self.pending)));
            }

            self.pending.extend_from_slice(&self.buf[..n]);
            let ready = ready_len(&self.pending);
            if ready > 0 {
                return Ok(Some(self.pending.drain(..ready).collect()));
            }
        }
    }
}

async fn next_chunk<R>(reader: &mut Option<ChunkReader<R>>) -> std::io::Result<Option<Vec<u8>>>
where
    R: AsyncRead + Unpin,
{
    match reader {
        Some(reader) => reader.next().await,
        None => Ok(None),
    }
}

/// How much of `pending` can be written now.
fn ready_len(pending: &[u8]) -> usize {
    match pending.iter().rposition(|&b| b == b'\\') {
        Some(start) if is_partial_escape(&pending[start..]) => start,
        _ => pending.len(),
    }
}

fn is_partial_escape(tail: &[u8]) -> bool {
    match tail {
        [b'\\'] | [b'\\', b'['] => true,
        [b'\\', b'[', digits @ ..] => {
            digits.len() <= MAX_ESCAPE_DIGITS && digits.iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}
