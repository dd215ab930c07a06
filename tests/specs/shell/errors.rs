// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operator-facing error surface specs.

use std::io::Write;

use crate::prelude::*;

#[test]
fn unknown_command_prints_caret_marker() {
    let run = nosh().command("show xyzzy").run().fails_with(4);
    let stderr = run.stderr();
    assert!(
        stderr.contains("Invalid input detected at \"^\" marker."),
        "stderr: {stderr}"
    );
    // Caret under the first unmatched character, past "show ".
    let caret = format!("\n{}^", " ".repeat(5));
    assert!(stderr.contains(&caret), "stderr: {stderr}");
}

#[test]
fn bad_token_caret_lands_inside_the_token() {
    let run = nosh().command("show interface vla5x 3").run().fails_with(4);
    let stderr = run.stderr();
    // "show interface " is 15 columns, "vla" matched 3 more.
    let caret = format!("\n{}^", " ".repeat(18));
    assert!(stderr.contains(&caret), "stderr: {stderr}");
}

#[test]
fn out_of_range_value_names_the_range() {
    nosh()
        .command("show interface eth 9999")
        .run()
        .fails_with(4)
        .stderr_has("Value out of range(1..4096).");
}

#[test]
fn incomplete_command_says_so() {
    nosh()
        .command("show interface")
        .run()
        .fails_with(4)
        .stderr_has("The command is not completed.");
}

#[test]
fn ambiguous_word_is_reported() {
    nosh()
        .command("show")
        .run()
        .fails_with(4)
        .stderr_has("Ambiguous command.");
}

#[test]
fn script_failures_exit_with_script_code() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut schema = std::fs::File::create(dir.path().join("fail.toml")).expect("schema");
    write!(
        schema,
        r#"
[view.v]
prompt = "> "
[[view.v.command]]
name = "break things"
action = {{ script = "echo breaking; exit 9", lock = false }}
"#
    )
    .expect("write schema");

    nosh_bare()
        .args(&["-x", &dir.path().display().to_string()])
        .command("break things")
        .run()
        .fails_with(2)
        .stdout_has("breaking");
}

#[test]
fn errors_do_not_end_the_session() {
    nosh()
        .command("bogus")
        .command("show version")
        .run()
        .fails_with(4)
        .stdout_has("nosh 0.2.0");
}
