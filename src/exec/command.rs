// src/exec/command.rs

use std::fmt;
use std::process::Stdio;

use tokio::process::Command;

/// Command line of a rerun: the original invocation without the watch flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RerunCommand {
    program: String,
    args: Vec<String>,
}

impl RerunCommand {
    /// Reproduce `interpreter args...`, dropping every token equal to `flag`.
    pub fn from_invocation(interpreter: &str, args: &[String], flag: &str) -> Self {
        Self {
            program: interpreter.to_string(),
            args: strip_flag(args, flag),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Process builder with both output streams piped.
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

impl fmt::Display for RerunCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_command(&self.program, &self.args, ""))
    }
}

/// Remove exact occurrences of `flag` before the first `--`. `--watch` goes,
/// `--watchful` and `--watcher=foo` stay, and everything after `--` belongs
/// to the test command and is kept as is.
pub fn strip_flag(args: &[String], flag: &str) -> Vec<String> {
    let mut passthrough = flag.is_empty();
    args.iter()
        .filter(|arg| {
            if passthrough {
                return true;
            }
            if arg.as_str() == "--" {
                passthrough = true;
                return true;
            }
            arg.as_str() != flag
        })
        .cloned()
        .collect()
}

/// Single-line rendering of a rerun: `interpreter arg arg`.
///
/// Tokens equal to `flag` and empty tokens are left out, so there is never a
/// doubled or trailing space.
pub fn join_command(interpreter: &str, args: &[String], flag: &str) -> String {
    let stripped = strip_flag(args, flag);
    std::iter::once(interpreter)
        .chain(stripped.iter().map(String::as_str))
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
