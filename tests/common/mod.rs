#![allow(dead_code)]

use std::sync::Arc;

use testwatch::cli;
use testwatch::engine::{WATCH_FLAG, WATCH_FLAG_HELP};
use testwatch::host::{BufferedOutput, Input, InputDefinition, SharedOutput};

pub use testwatch_test_utils::init_tracing;

/// Host definition as it looks after the controller handled `start`.
pub fn watch_definition() -> InputDefinition {
    let mut definition = cli::definition();
    definition.add_flag(WATCH_FLAG, WATCH_FLAG_HELP);
    definition
}

pub fn parse_input(definition: &InputDefinition, interpreter: &str, args: &[&str]) -> Input {
    Input::parse(definition, interpreter, args.iter().copied()).expect("input should parse")
}

/// A buffered sink plus the same sink as a `SharedOutput`.
pub fn buffered_output() -> (Arc<BufferedOutput>, SharedOutput) {
    let buffer = Arc::new(BufferedOutput::new());
    let output: SharedOutput = buffer.clone();
    (buffer, output)
}
