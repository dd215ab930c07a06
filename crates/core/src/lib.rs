// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nosh-core: data model for the nosh command shell engine.
//!
//! Holds the schema-built catalog (parameter types, parameter trees,
//! commands, views), the parsed-argument records produced by the line
//! parser, and the variable expansion / test-expression support used to
//! gate parameters and render prompts and action scripts.

pub mod catalog;
pub mod command;
pub mod expand;
pub mod param;
pub mod pargv;
pub mod ptype;
pub mod schema;
pub mod view;

pub use catalog::{Catalog, PtypeId, ViewId};
pub use command::{ActionSpec, Command, RestorePolicy};
pub use expand::{expand, line_test, ExpandError, Scope};
pub use param::{Param, ParamMode, ParamVec};
pub use pargv::{ParsedArg, ParsedArgs};
pub use ptype::{HelpStyle, MethodKind, ParamType, Preprocess, SelectItem};
pub use schema::{Schema, SchemaError};
pub use view::View;
