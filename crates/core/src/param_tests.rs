// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::catalog::PtypeId;

fn param(name: &str) -> Param {
    Param::new(name, PtypeId::from_raw(0))
}

#[test]
fn effective_value_falls_back_to_name() {
    let mut p = param("terminal");
    assert_eq!(p.effective_value(), "terminal");
    p.set_value("term");
    assert_eq!(p.effective_value(), "term");
}

#[test]
fn paramv_preserves_order() {
    let mut v = ParamVec::default();
    v.push(param("first"));
    v.push(param("second"));
    assert_eq!(v.len(), 2);
    assert_eq!(v.get(1).map(Param::name), Some("second"));
    assert!(v.get(2).is_none());
    let names: Vec<_> = v.iter().map(Param::name).collect();
    assert_eq!(names, vec!["first", "second"]);
}

#[test]
fn nested_params_form_a_tree() {
    let mut sw = param("target");
    sw.mode = ParamMode::Switch;
    let mut alt = param("nexthop");
    alt.mode = ParamMode::Subcommand;
    alt.params.push(param("addr"));
    sw.params.push(alt);
    assert!(sw.is_switch());
    assert_eq!(sw.params.get(0).unwrap().params.len(), 1);
}
