// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Variable expansion for prompts, test expressions, action scripts, and
//! view-id assignments.
//!
//! Recognises `${NAME}` and `${NAME:default}`. Names resolve against the
//! current bindings first, then the view-stack frames top-down, then the
//! process environment. Every result is a freshly owned string.

use indexmap::IndexMap;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::pargv::ParsedArgs;
use crate::ptype::MethodKind;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExpandError {
    #[error("unterminated variable reference at offset {0}")]
    Unterminated(usize),
}

/// Resolution scope for one expansion.
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    pub catalog: &'a Catalog,
    pub bindings: Option<&'a ParsedArgs<'a>>,
    /// View-stack frames, bottom of the stack first.
    pub frames: &'a [IndexMap<String, String>],
    pub use_env: bool,
}

impl<'a> Scope<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            bindings: None,
            frames: &[],
            use_env: true,
        }
    }

    pub fn with_bindings(mut self, bindings: &'a ParsedArgs<'a>) -> Self {
        self.bindings = Some(bindings);
        self
    }

    pub fn with_frames(mut self, frames: &'a [IndexMap<String, String>]) -> Self {
        self.frames = frames;
        self
    }

    /// Resolve one variable name.
    ///
    /// A binding whose type is a plain selection substitutes the item's
    /// declared value, so scripts see `1` where the operator typed `on`.
    pub fn lookup(&self, name: &str) -> Option<String> {
        if let Some(bindings) = self.bindings {
            if let Some(arg) = bindings.iter().find(|arg| arg.param.name() == name) {
                let ptype = self.catalog.ptype(arg.param.ptype);
                if ptype.kind() == MethodKind::Select {
                    if let Some(value) = ptype.translate(&arg.value, false) {
                        return Some(value);
                    }
                }
                return Some(arg.value.clone());
            }
        }
        for frame in self.frames.iter().rev() {
            if let Some(value) = frame.get(name) {
                return Some(value.clone());
            }
        }
        if self.use_env {
            return std::env::var(name).ok();
        }
        None
    }
}

/// Expand every `${NAME}` / `${NAME:default}` reference in `template`.
///
/// Unknown names expand to their default, or to the empty string.
pub fn expand(template: &str, scope: &Scope<'_>) -> Result<String, ExpandError> {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch != '$' || chars.peek().map(|(_, c)| *c) != Some('{') {
            result.push(ch);
            continue;
        }
        chars.next(); // consume '{'

        let mut name = String::new();
        let mut default = None::<String>;
        let mut closed = false;
        for (_, ch) in chars.by_ref() {
            match ch {
                '}' => {
                    closed = true;
                    break;
                }
                ':' if default.is_none() => default = Some(String::new()),
                _ => match &mut default {
                    Some(d) => d.push(ch),
                    None => name.push(ch),
                },
            }
        }
        if !closed {
            return Err(ExpandError::Unterminated(pos));
        }

        match scope.lookup(&name) {
            Some(value) => result.push_str(&value),
            None => result.push_str(default.as_deref().unwrap_or("")),
        }
    }

    Ok(result)
}

/// Evaluate an already-expanded test expression.
///
/// Supports the `test(1)` forms schemas use: bare-string truthiness,
/// `-z` / `-n`, `=` / `==` / `!=`, the integer comparators, and a leading
/// `!`. Malformed expressions evaluate false.
pub fn line_test(expr: &str) -> bool {
    let words: Vec<&str> = expr.split_whitespace().collect();
    eval_test(&words)
}

fn eval_test(words: &[&str]) -> bool {
    match words {
        [] => false,
        ["!", rest @ ..] => !eval_test(rest),
        [single] => !single.is_empty(),
        ["-z", s] => s.is_empty(),
        ["-n", s] => !s.is_empty(),
        [a, op, b] => eval_binary(a, op, b),
        _ => false,
    }
}

fn eval_binary(a: &str, op: &str, b: &str) -> bool {
    match op {
        "=" | "==" => a == b,
        "!=" => a != b,
        "-eq" | "-ne" | "-lt" | "-le" | "-gt" | "-ge" => {
            let (Ok(x), Ok(y)) = (a.parse::<i64>(), b.parse::<i64>()) else {
                return false;
            };
            match op {
                "-eq" => x == y,
                "-ne" => x != y,
                "-lt" => x < y,
                "-le" => x <= y,
                "-gt" => x > y,
                _ => x >= y,
            }
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "expand_tests.rs"]
mod tests;
