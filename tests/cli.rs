//! Process-level checks of the CLI contract: wrong argument counts exit
//! with code 2 and a usage message, and never produce output on stdout.

use std::process::Command;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_foodfacts_lookup"))
}

#[test]
fn zero_arguments_exits_2_with_usage() {
    let output = binary().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "{stderr}");
}

#[test]
fn extra_arguments_exit_2_with_usage() {
    let output = binary().args(["737628064502", "extra"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "{stderr}");
}
