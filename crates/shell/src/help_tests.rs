// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::testutil::{catalog, ctx, view};

fn names(page: &HelpPage) -> Vec<&str> {
    page.rows.iter().map(|row| row.name.as_str()).collect()
}

#[test]
fn empty_line_lists_view_commands() {
    let catalog = catalog();
    let ctx = ctx(&catalog);
    let page = help_line(&ctx, view(&catalog, "enable-view"), "");
    // Sorted first words of every visible command, including globals.
    assert_eq!(
        names(&page),
        vec!["configure", "end", "exit", "ping", "show"]
    );
    assert!(!page.complete);
}

#[test]
fn next_tokens_are_sorted_without_cr_for_partial_line() {
    let catalog = catalog();
    let ctx = ctx(&catalog);
    let page = help_line(&ctx, view(&catalog, "enable-view"), "show ");
    // "interface" comes from the longer command name, the keywords from
    // the resolved "show" command's switch.
    assert_eq!(names(&page), vec!["clock", "interface", "version"]);
    assert!(!page.complete);
}

#[test]
fn completed_line_appends_cr_last() {
    let catalog = catalog();
    let ctx = ctx(&catalog);
    let page = help_line(&ctx, view(&catalog, "enable-view"), "show version ");
    assert_eq!(names(&page), vec![CR_MARKER]);
    assert!(page.complete);
}

#[test]
fn partial_item_shows_matching_name_with_extended_help() {
    let catalog = catalog();
    let ctx = ctx(&catalog);
    let page = help_line(&ctx, view(&catalog, "enable-view"), "show int vla");
    assert_eq!(names(&page), vec!["vlan"]);
    assert_eq!(page.rows[0].help.as_deref(), Some("Vlan interface"));
}

#[test]
fn interface_command_past_token_shows_value_sample() {
    let catalog = catalog();
    let ctx = ctx(&catalog);
    let page = help_line(&ctx, view(&catalog, "configure-view"), "interface vlan ");
    assert_eq!(names(&page), vec!["<1-4096>"]);
    assert_eq!(page.rows[0].help.as_deref(), Some("Interface to configure"));
}

#[test]
fn interface_command_mid_token_lists_names() {
    let catalog = catalog();
    let ctx = ctx(&catalog);
    let page = help_line(&ctx, view(&catalog, "configure-view"), "interface vl");
    assert_eq!(names(&page), vec!["vlan"]);
}

#[test]
fn switch_position_lists_every_eligible_alternative() {
    let catalog = catalog();
    let ctx = ctx(&catalog);
    let page = help_line(&ctx, view(&catalog, "configure-view"), "ip route 10.0.0.0/8 ");
    // Keywords, the three interface items, and the positional gateway,
    // plus <cr> since the route is already valid.
    assert_eq!(
        names(&page),
        vec![
            "A.B.C.D",
            "distance",
            "ethernet",
            "nexthop",
            "portchannel",
            "vlan",
            CR_MARKER
        ]
    );
    assert!(page.complete);
}

#[test]
fn integer_parameter_renders_its_range() {
    let catalog = catalog();
    let ctx = ctx(&catalog);
    let page = help_line(
        &ctx,
        view(&catalog, "configure-view"),
        "ip route 10.0.0.0/8 distance ",
    );
    assert_eq!(names(&page), vec!["<1..255>"]);
    assert_eq!(page.rows[0].help.as_deref(), Some("Distance value"));
}

#[test]
fn select_with_extended_help_lists_items() {
    let catalog = catalog();
    let ctx = ctx(&catalog);
    let page = help_line(&ctx, view(&catalog, "configure-view"), "logging ");
    assert_eq!(names(&page), vec!["off", "on"]);
    let on = page.rows.iter().find(|r| r.name == "on").expect("on row");
    assert_eq!(on.help.as_deref(), Some("Enable logging"));
}

#[test]
fn args_catch_all_uses_type_text() {
    let catalog = catalog();
    let ctx = ctx(&catalog);
    let page = help_line(&ctx, view(&catalog, "enable-view"), "ping ");
    assert_eq!(names(&page), vec!["Text line", CR_MARKER]);
}

#[test]
fn unknown_line_yields_no_rows() {
    let catalog = catalog();
    let ctx = ctx(&catalog);
    let page = help_line(&ctx, view(&catalog, "enable-view"), "xyzzy ");
    assert!(page.is_empty());
}

#[test]
fn render_pads_to_widest_name() {
    let catalog = catalog();
    let ctx = ctx(&catalog);
    let page = help_line(&ctx, view(&catalog, "enable-view"), "show ");
    let text = page.render();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("  clock "));
    // Help texts line up in one column.
    let first = lines[0].find("Current time").expect("clock help");
    let second = lines[1].find("Display interface status").expect("interface help");
    assert_eq!(first, second);
}

#[test]
fn sole_detail_surfaces_for_single_row() {
    let catalog = catalog();
    let ctx = ctx(&catalog);
    let page = help_line(&ctx, view(&catalog, "enable-view"), "sho");
    assert_eq!(names(&page), vec!["show"]);
    assert_eq!(
        page.sole_detail(),
        Some("Show runtime state of the system.")
    );
}
