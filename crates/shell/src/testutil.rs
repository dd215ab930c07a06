// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared router-style schema fixture for engine tests.

use nosh_core::{Catalog, Command, Schema, ViewId};

use crate::parse::ParseContext;

/// A small router-style command tree exercising every parameter shape.
pub(crate) const ROUTER_SCHEMA: &str = r#"
[ptype.IFACE]
method = "regexp-select"
pattern = '[A-Za-z]+ ?[0-9/]*'
ext_pattern = "ethernet vlan portchannel"
ext_help = "(Physical interface)(Vlan interface)(Aggregated link)"
text = "Interface name"

[ptype.IFNAME]
method = "regexp-select"
pattern = '[A-Za-z]+ ?[0-9/]+'
ext_pattern = "ethernet(slot/port) vlan(1-4096) portchannel(1-64)"
ext_help = "(Physical interface)(Vlan interface)(Aggregated link)"
text = "Interface name"

[ptype.VLAN_ID]
method = "unsignedInteger"
pattern = "1..4096"
text = "Vlan id"

[ptype.DISTANCE]
method = "unsignedInteger"
pattern = "1..255"
text = "Route distance"

[ptype.PREFIX]
method = "regexp"
pattern = '[0-9.]+/[0-9]+'
text = "A.B.C.D/M"

[ptype.IP_ADDR]
method = "regexp"
pattern = '[0-9.]+'
text = "A.B.C.D"

[ptype.STATE]
method = "select"
pattern = "on(enable) off(disable)"
ext_help = "(Enable logging)(Disable logging)"
text = "Logging state"

[ptype.LINE]
method = "code"
text = "Text line"

[view.enable-view]
prompt = "${HOSTNAME:router}# "

[[view.enable-view.command]]
name = "show"
help = "Display system information"
detail = "Show runtime state of the system."
action = { builtin = "nop", lock = false }

[[view.enable-view.command.param]]
name = "topic"
mode = "switch"

[[view.enable-view.command.param.param]]
name = "version"
mode = "subcommand"
help = "Software version"

[[view.enable-view.command.param.param]]
name = "clock"
mode = "subcommand"
help = "Current time"

[[view.enable-view.command]]
name = "show interface"
help = "Display interface status"
action = { builtin = "nop", lock = false }

[[view.enable-view.command.param]]
name = "iface"
ptype = "IFACE"
help = "Interface to display"

[[view.enable-view.command.param]]
name = "unit"
ptype = "VLAN_ID"
help = "Unit number"

[[view.enable-view.command]]
name = "configure terminal"
help = "Enter configuration mode"
view = "configure-view"
action = { builtin = "nop", lock = false }

[[view.enable-view.command]]
name = "ping"
help = "Send echo requests"
action = { builtin = "nop", lock = false }
args = { name = "target", ptype = "LINE", help = "Destination and options" }

[view.configure-view]
prompt = "${HOSTNAME:router}(config)# "
depth = 1

[[view.configure-view.command]]
name = "interface"
help = "Select an interface"
action = { builtin = "nop", lock = false }

[[view.configure-view.command.param]]
name = "iface"
ptype = "IFNAME"
help = "Interface to configure"
view = "interface-view"
viewid = "iface=${iface}"

[[view.configure-view.command]]
name = "ip route"
help = "Configure a static route"
action = { builtin = "nop", lock = false }

[[view.configure-view.command.param]]
name = "prefix"
ptype = "PREFIX"
help = "Destination prefix"

[[view.configure-view.command.param]]
name = "opt1"
mode = "switch"
optional = true

[[view.configure-view.command.param.param]]
name = "nexthop"
mode = "subcommand"
help = "Next hop address"

[[view.configure-view.command.param.param.param]]
name = "addr"
ptype = "IP_ADDR"
help = "Forwarding address"

[[view.configure-view.command.param.param]]
name = "iface"
ptype = "IFNAME"
help = "Egress interface"

[[view.configure-view.command.param.param]]
name = "distance"
mode = "subcommand"
help = "Administrative distance"

[[view.configure-view.command.param.param.param]]
name = "dist"
ptype = "DISTANCE"
help = "Distance value"

[[view.configure-view.command.param.param]]
name = "gateway"
ptype = "IP_ADDR"
help = "Gateway address"

[[view.configure-view.command.param]]
name = "opt2"
mode = "switch"
optional = true

[[view.configure-view.command.param.param]]
name = "nexthop"
mode = "subcommand"
help = "Next hop address"

[[view.configure-view.command.param.param.param]]
name = "addr"
ptype = "IP_ADDR"
help = "Forwarding address"

[[view.configure-view.command.param.param]]
name = "iface"
ptype = "IFNAME"
help = "Egress interface"

[[view.configure-view.command.param.param]]
name = "distance"
mode = "subcommand"
help = "Administrative distance"

[[view.configure-view.command.param.param.param]]
name = "dist"
ptype = "DISTANCE"
help = "Distance value"

[[view.configure-view.command]]
name = "logging"
help = "Configure logging"
action = { builtin = "nop", lock = false }

[[view.configure-view.command.param]]
name = "state"
ptype = "STATE"
help = "Logging state"

[view.interface-view]
prompt = "${HOSTNAME:router}(config-if-${iface})# "
depth = 2

[[view.interface-view.command]]
name = "shutdown"
help = "Disable the interface"
action = { builtin = "nop", lock = false }

[view.global]

[[view.global.command]]
name = "exit"
help = "Close the session"
action = { builtin = "close", lock = false }

[[view.global.command]]
name = "end"
help = "Return to the top view"
restore = "depth"
action = { builtin = "nop", lock = false }
"#;

pub(crate) fn catalog() -> Catalog {
    Schema::parse(ROUTER_SCHEMA).unwrap()
}

pub(crate) fn ctx(catalog: &Catalog) -> ParseContext<'_, 'static> {
    ParseContext {
        catalog,
        frames: &[],
        use_alt_name: false,
    }
}

pub(crate) fn view(catalog: &Catalog, name: &str) -> ViewId {
    catalog.find_view(name).unwrap()
}

pub(crate) fn command<'a>(catalog: &'a Catalog, view_name: &str, name: &str) -> &'a Command {
    catalog
        .view(view(catalog, view_name))
        .commands()
        .find(|cmd| cmd.name() == name)
        .unwrap()
}
