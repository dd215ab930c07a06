// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Flag parsing and usage specs.

use crate::prelude::*;

#[test]
fn help_flag_shows_usage() {
    nosh_bare().args(&["--help"]).run().passes().stdout_has("Usage:");
}

#[test]
fn version_flag_shows_version() {
    nosh_bare().args(&["--version"]).run().passes().stdout_has("0.2");
}

#[test]
fn missing_schema_dir_is_a_usage_error() {
    nosh_bare()
        .command("show version")
        .run()
        .fails_with(1)
        .stderr_has("schema directory");
}

#[test]
fn unknown_flag_is_a_usage_error() {
    nosh_bare().args(&["--no-such-flag"]).run().fails_with(1);
}

#[test]
fn unknown_start_view_is_a_usage_error() {
    nosh()
        .args(&["--view", "no-such-view"])
        .command("show version")
        .run()
        .fails_with(1)
        .stderr_has("no-such-view");
}

#[test]
fn missing_schema_directory_is_a_system_error() {
    nosh_bare()
        .args(&["-x", "/nonexistent/schemas"])
        .command("show version")
        .run()
        .fails_with(3)
        .stderr_has("schema load failed");
}
