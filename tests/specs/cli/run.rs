// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot and batch execution specs.

use std::io::Write;

use crate::prelude::*;

#[test]
fn one_shot_command_prints_action_output() {
    nosh()
        .command("show version")
        .run()
        .passes()
        .stdout_has("nosh 0.2.0");
}

#[test]
fn abbreviations_and_short_forms_canonicalise() {
    nosh()
        .command("show int eth 10")
        .run()
        .passes()
        .stdout_has("interface ethernet unit 10 is up");
}

#[test]
fn quiet_suppresses_action_output() {
    nosh()
        .args(&["-q"])
        .command("show version")
        .run()
        .passes()
        .stdout_lacks("nosh");
}

#[test]
fn commands_share_one_session() {
    nosh()
        .command("configure terminal")
        .command("interface vlan 5")
        .command("shutdown")
        .run()
        .passes()
        .stdout_has("vlan5 disabled");
}

#[test]
fn exit_closes_and_skips_the_rest() {
    nosh()
        .command("exit")
        .command("show version")
        .run()
        .passes()
        .stdout_lacks("nosh 0.2.0");
}

#[test]
fn batch_file_runs_line_by_line() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "# provision a vlan interface").expect("write");
    writeln!(file, "configure terminal").expect("write");
    writeln!(file, "interface vlan 7").expect("write");
    writeln!(file, "shutdown").expect("write");
    nosh()
        .args(&["-f", &file.path().display().to_string()])
        .run()
        .passes()
        .stdout_has("vlan7 disabled");
}

#[test]
fn batch_errors_carry_file_and_line() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "show version").expect("write");
    writeln!(file, "show xyzzy").expect("write");
    let path = file.path().display().to_string();
    nosh()
        .args(&["-f", &path])
        .run()
        .fails_with(4)
        .stderr_has(&format!("{path}:2:"))
        .stderr_has("Invalid input detected");
}

#[test]
fn stop_on_error_halts_the_batch() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "show xyzzy").expect("write");
    writeln!(file, "show version").expect("write");
    nosh()
        .args(&["-e", "-f", &file.path().display().to_string()])
        .run()
        .fails_with(4)
        .stdout_lacks("nosh 0.2.0");
}

#[test]
fn later_lines_still_run_without_stop_on_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "show xyzzy").expect("write");
    writeln!(file, "show version").expect("write");
    nosh()
        .args(&["-f", &file.path().display().to_string()])
        .run()
        .fails_with(4)
        .stdout_has("nosh 0.2.0");
}

#[test]
fn dry_run_skips_scripts() {
    nosh()
        .args(&["--dry-run"])
        .command("show version")
        .run()
        .passes()
        .stdout_lacks("nosh");
}
