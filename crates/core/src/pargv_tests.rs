// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::catalog::PtypeId;
use crate::param::Param;

fn param(name: &str) -> Param {
    Param::new(name, PtypeId::from_raw(0))
}

#[test]
fn insert_and_find() {
    let iface = param("iface");
    let mut pargs = ParsedArgs::new();
    pargs.insert(&iface, "ethernet0").unwrap();
    assert_eq!(pargs.find("iface"), Some("ethernet0"));
    assert_eq!(pargs.find("missing"), None);
}

#[test]
fn duplicate_name_is_rejected() {
    let iface = param("iface");
    let mut pargs = ParsedArgs::new();
    pargs.insert(&iface, "ethernet0").unwrap();
    let err = pargs.insert(&iface, "vlan1").unwrap_err();
    assert_eq!(err, DuplicateParam("iface".into()));
    assert_eq!(pargs.len(), 1);
}

#[test]
fn switch_stores_choice_then_token() {
    let target = param("target");
    let nexthop = param("nexthop");
    let mut pargs = ParsedArgs::new();
    pargs.insert(&target, nexthop.name()).unwrap();
    pargs.insert(&nexthop, "10.0.0.1").unwrap();
    assert_eq!(pargs.find("target"), Some("nexthop"));
    assert_eq!(pargs.find("nexthop"), Some("10.0.0.1"));
    assert_eq!(pargs.last().unwrap().value, "10.0.0.1");
}
