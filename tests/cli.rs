//! Command line contract of the `bitdepth-sweep` binary.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bitdepth-sweep"))
        .args(args)
        .output()
        .expect("failed to launch bitdepth-sweep")
}

fn assert_usage_error(output: &Output) {
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Usage:"), "stdout was {stdout:?}");
    assert!(stdout.trim_end().ends_with("<original.wav>"));
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_no_arguments_prints_usage_and_exits_1() {
    assert_usage_error(&run(&[]));
}

#[test]
fn test_two_arguments_prints_usage_and_exits_1() {
    assert_usage_error(&run(&["a.wav", "b.wav"]));
}

#[test]
fn test_help_flag_is_a_usage_error() {
    assert_usage_error(&run(&["--help"]));
}
