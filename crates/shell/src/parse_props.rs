// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property-based tests for parser invariants.

use proptest::prelude::*;

use super::*;
use crate::args::Args;
use crate::testutil::{catalog, command, ctx};

proptest! {
    /// Any subset of the route options, in any order, parses with each
    /// switch occurrence bound to exactly one alternative.
    #[test]
    fn switch_occurrences_stay_exclusive(
        use_distance in any::<bool>(),
        use_nexthop in any::<bool>(),
        swap in any::<bool>(),
    ) {
        let catalog = catalog();
        let ctx = ctx(&catalog);
        let cmd = command(&catalog, "configure-view", "ip route");

        let mut options = Vec::new();
        if use_distance { options.push("distance 20"); }
        if use_nexthop { options.push("nexthop 10.0.0.1"); }
        if swap { options.reverse(); }
        let line = format!("ip route 10.0.0.0/8 {}", options.join(" "));

        let result = parse_line(&ctx, cmd, &Args::parse(line.trim_end()), 0, None);
        prop_assert_eq!(result.status, ParseStatus::Ok);

        // Each bound switch names exactly one alternative, and that
        // alternative is bound too.
        for switch in ["opt1", "opt2"] {
            if let Some(choice) = result.pargs.find(switch) {
                prop_assert!(result.pargs.find(choice).is_some());
            }
        }
        let switch_bindings = result
            .pargs
            .iter()
            .filter(|arg| arg.param.is_switch())
            .count();
        prop_assert_eq!(switch_bindings, options.len());
    }

    /// Tokens that belong to a mandatory parameter are never consumed by
    /// a non-matching optional sibling, with or without the optional
    /// keyword present.
    #[test]
    fn optionals_do_not_starve_mandatories(count in 1u64..=100, with_detail in any::<bool>()) {
        let catalog = nosh_core::Schema::parse(
            r#"
[ptype.COUNT]
method = "unsignedInteger"
pattern = "1..100"
[view.v]
[[view.v.command]]
name = "repeat"
[[view.v.command.param]]
name = "detail"
mode = "subcommand"
optional = true
[[view.v.command.param]]
name = "count"
ptype = "COUNT"
"#,
        )
        .unwrap();
        let ctx = ParseContext { catalog: &catalog, frames: &[], use_alt_name: false };
        let cmd = command(&catalog, "v", "repeat");

        let line = if with_detail {
            format!("repeat detail {count}")
        } else {
            format!("repeat {count}")
        };
        let result = parse_line(&ctx, cmd, &Args::parse(&line), 0, None);
        prop_assert_eq!(result.status, ParseStatus::Ok);
        let count_str = count.to_string();
        prop_assert_eq!(result.pargs.find("count"), Some(count_str.as_str()));
        prop_assert_eq!(result.pargs.find("detail").is_some(), with_detail);
    }

    /// Validated bindings survive re-validation unchanged: the canonical
    /// form the parser stores is a fixed point of its type.
    #[test]
    fn bindings_are_canonical(prefix in "(e|et|eth|v|vl|vla|p|po)", digits in "[0-9]{1,3}") {
        let catalog = catalog();
        let ctx = ctx(&catalog);
        let cmd = command(&catalog, "enable-view", "show interface");
        let line = format!("show interface {prefix}{digits} 7");
        let result = parse_line(&ctx, cmd, &Args::parse(&line), 0, None);
        prop_assert_eq!(result.status, ParseStatus::Ok);
        let bound = result.pargs.find("iface").map(str::to_string);
        prop_assert!(bound.is_some());
        let bound = bound.unwrap_or_default();
        let ptype = catalog.ptype(cmd.params.get(0).unwrap().ptype);
        prop_assert_eq!(ptype.validate(&bound, false), Some(bound.clone()));
    }
}
