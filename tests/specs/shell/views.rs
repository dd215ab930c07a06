// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! View-stack behavior specs.

use crate::prelude::*;

#[test]
fn configure_enters_the_config_view() {
    // The config-view command only resolves after the view switch.
    nosh()
        .command("configure terminal")
        .command("logging on")
        .run()
        .passes()
        .stdout_has("logging enable");
}

#[test]
fn config_commands_do_not_leak_into_enable_view() {
    nosh()
        .command("logging on")
        .run()
        .fails_with(4)
        .stderr_has("Invalid input detected");
}

#[test]
fn interface_view_carries_its_variables() {
    nosh()
        .command("conf t")
        .command("interface eth 0/1")
        .command("shutdown")
        .run()
        .passes()
        .stdout_has("ethernet0/1 disabled");
}

#[test]
fn end_returns_to_the_enable_view() {
    nosh()
        .command("conf t")
        .command("interface vlan 9")
        .command("end")
        .command("show version")
        .run()
        .passes()
        .stdout_has("nosh 0.2.0");
}

#[test]
fn select_values_reach_action_scripts() {
    nosh()
        .command("configure terminal")
        .command("logging off")
        .run()
        .passes()
        .stdout_has("logging disable");
}

#[test]
fn route_options_bind_in_any_order() {
    nosh()
        .command("configure terminal")
        .command("ip route 10.0.0.0/8 distance 20 nexthop 10.0.0.1")
        .run()
        .passes()
        .stdout_has("route 10.0.0.0/8 nexthop 10.0.0.1 distance 20");
}
