// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`command`] rebuilds the original invocation without the watch flag.
//! - [`stream`] mirrors a child's stdout/stderr into an output sink and
//!   restores color escapes.
//! - [`rerun`] provides `RerunExecutor`, the change listener that ties the
//!   two together.

pub mod command;
pub mod rerun;
pub mod stream;

pub use command::{join_command, strip_flag, RerunCommand};
pub use rerun::{RerunExecutor, DEFAULT_STRIP_FLAG};
pub use stream::{pipe_output, restore_escape_bytes, restore_escapes};
