// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command declarations: a named entry of a view with its parameter tree,
//! action, and view-transition attributes.

use crate::catalog::ViewId;
use crate::param::{Param, ParamVec};

/// View-stack adjustment applied before a command executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestorePolicy {
    #[default]
    None,
    /// Pop back to the command's declaration view.
    View,
    /// Truncate the stack to the command's declaration depth.
    Depth,
}

/// What a command runs when its line parses.
#[derive(Debug, Clone, Default)]
pub struct ActionSpec {
    /// Name of a registered builtin handler; scripts run through the
    /// session's script action when absent.
    pub builtin: Option<String>,
    /// Script template, expanded against the parsed bindings.
    pub script: Option<String>,
    /// Take the session lock file around execution.
    pub lock: bool,
    /// Leave interrupt signals deliverable while running.
    pub interrupt: bool,
    /// Run even under dry-run.
    pub permanent: bool,
}

impl ActionSpec {
    pub fn is_empty(&self) -> bool {
        self.builtin.is_none() && self.script.is_none()
    }
}

/// A named command registered in a view.
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    pub text: Option<String>,
    pub detail: Option<String>,
    pub params: ParamVec,
    /// Catch-all parameter consuming the remainder of the line as one
    /// string.
    pub args: Option<Param>,
    pub action: ActionSpec,
    pub restore: RestorePolicy,
    /// Declaration view.
    pub view: ViewId,
    /// Declaration depth (the view's depth).
    pub depth: usize,
    pub test: Option<String>,
    pub hidden: bool,
    pub enabled: bool,
    /// Target view entered after a successful run.
    pub viewname: Option<String>,
    /// `name=value;...` variable assignments for the entered view.
    pub viewid: Option<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, view: ViewId) -> Self {
        Self {
            name: name.into(),
            text: None,
            detail: None,
            params: ParamVec::default(),
            args: None,
            action: ActionSpec::default(),
            restore: RestorePolicy::None,
            view,
            depth: 0,
            test: None,
            hidden: false,
            enabled: true,
            viewname: None,
            viewid: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whitespace-delimited words of the command name.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.name.split_whitespace()
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    /// The command word at `index`, if any.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words().nth(index)
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
