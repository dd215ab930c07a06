// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy surfaced by the engine.
//!
//! Every error recovers to the prompt; only EOF or an explicit close ends
//! the session. Syntax errors carry the byte column where matching first
//! diverged so callers can render the `^` marker.

use nosh_core::ExpandError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    /// No command resolves for the line prefix.
    #[error("Invalid input detected at \"^\" marker.")]
    UnknownCommand { column: usize },

    /// More than one command completes the entered line.
    #[error("Ambiguous command.")]
    AmbiguousCommand,

    /// A token failed its parameter's validation.
    #[error("{}", bad_parameter_message(.range.as_deref()))]
    BadParameter {
        column: usize,
        /// Set for integer-family failures; switches the message to the
        /// out-of-range form.
        range: Option<String>,
    },

    /// Non-optional parameters are missing at enter.
    #[error("The command is not completed.")]
    PartialCommand,

    /// The action returned a nonzero code.
    #[error("script returned {code}")]
    ScriptError { code: i32 },

    /// I/O or lock failure; the command aborts, the session continues.
    #[error("system error: {0}")]
    System(#[from] std::io::Error),

    #[error(transparent)]
    Expand(#[from] ExpandError),
}

fn bad_parameter_message(range: Option<&str>) -> String {
    match range {
        Some(range) => format!("Value out of range({range})."),
        None => "Invalid input detected at \"^\" marker.".to_string(),
    }
}

impl ShellError {
    /// Column for the `^` marker, when the error is positional.
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::UnknownCommand { column } => Some(*column),
            Self::BadParameter { column, .. } => Some(*column),
            _ => None,
        }
    }

    /// Process exit code class: 2 script, 3 system, 4 syntax.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ScriptError { .. } => 2,
            Self::System(_) => 3,
            Self::Expand(_) => 3,
            _ => 4,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
