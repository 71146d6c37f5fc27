// tests/rerun_command.rs

use testwatch::exec::{join_command, restore_escapes, strip_flag, RerunCommand};

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn watch_flag_is_removed_from_the_rerun_command() {
    let line = join_command("php", &args(&["bin/run", "specs/", "--watch"]), "--watch");
    assert_eq!(line, "php bin/run specs/");
}

#[test]
fn only_exact_tokens_are_stripped() {
    let kept = strip_flag(
        &args(&["--watchful", "--watch", "--watcher=foo", "--watch"]),
        "--watch",
    );
    assert_eq!(kept, args(&["--watchful", "--watcher=foo"]));
}

#[test]
fn arguments_after_the_separator_are_kept() {
    let kept = strip_flag(&args(&["--watch", "--", "mytool", "--watch"]), "--watch");
    assert_eq!(kept, args(&["--", "mytool", "--watch"]));

    let line = join_command("testwatch", &args(&["--watch", "--", "mytool", "--watch"]), "--watch");
    assert_eq!(line, "testwatch -- mytool --watch");
}

#[test]
fn empty_tokens_never_produce_double_spaces() {
    let line = join_command("runner", &args(&["", "a", "--watch", "", "b"]), "--watch");
    assert_eq!(line, "runner a b");
}

#[test]
fn interpreter_alone_when_only_the_flag_was_given() {
    assert_eq!(join_command("runner", &args(&["--watch"]), "--watch"), "runner");
}

#[test]
fn empty_flag_strips_nothing() {
    assert_eq!(strip_flag(&args(&["a", ""]), ""), args(&["a", ""]));
}

#[test]
fn rerun_command_reproduces_the_invocation() {
    let command = RerunCommand::from_invocation(
        "runner",
        &args(&["--watch", "--", "cargo", "test"]),
        "--watch",
    );

    assert_eq!(command.program(), "runner");
    assert_eq!(command.args(), &args(&["--", "cargo", "test"])[..]);
    assert_eq!(command.to_string(), "runner -- cargo test");
}

#[test]
fn escaped_color_codes_are_restored() {
    assert_eq!(restore_escapes(r"\[32mok\[0m"), "\x1b[32mok\x1b[0m");
    assert_eq!(restore_escapes(r"\[1m\[31mFAIL"), "\x1b[1m\x1b[31mFAIL");
}

#[test]
fn other_text_is_left_alone() {
    assert_eq!(restore_escapes("plain text"), "plain text");
    assert_eq!(restore_escapes(r"\[xm"), r"\[xm");
    assert_eq!(restore_escapes("[32m"), "[32m");
}
