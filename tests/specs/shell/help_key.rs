// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `?` help surface specs.

use crate::prelude::*;

#[test]
fn bare_question_mark_lists_commands() {
    let run = nosh().command("?").run().passes();
    let stderr = run.stderr();
    for word in ["configure", "exit", "end", "ping", "show"] {
        assert!(stderr.contains(word), "missing {word}: {stderr}");
    }
}

#[test]
fn interface_position_lists_items_with_extended_help() {
    let run = nosh().command("show interface ?").run().passes();
    let stderr = run.stderr();
    for needle in ["ethernet", "vlan", "portchannel", "Vlan interface"] {
        assert!(stderr.contains(needle), "missing {needle}: {stderr}");
    }
    assert!(!stderr.contains("<cr>"), "incomplete line got <cr>: {stderr}");
}

#[test]
fn completed_line_offers_cr() {
    nosh()
        .command("show version ?")
        .run()
        .passes()
        .stderr_has("<cr>");
}

#[test]
fn rows_are_sorted_case_insensitively() {
    let run = nosh().command("show ?").run().passes();
    let stderr = run.stderr();
    let interface = stderr.find("interface").expect("interface row");
    let version = stderr.find("version").expect("version row");
    assert!(interface < version, "rows unsorted: {stderr}");
}

#[test]
fn partial_token_filters_the_rows() {
    let run = nosh().command("show int vla?").run().passes();
    let stderr = run.stderr();
    assert!(stderr.contains("vlan"), "stderr: {stderr}");
    assert!(!stderr.contains("ethernet"), "stderr: {stderr}");
}
