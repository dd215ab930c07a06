// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command resolution over the current and global views.
//!
//! Both views are searched; the winner carries the longer name, with ties
//! falling to the current view and then to registration order. A line
//! whose words abbreviate several same-length command names is ambiguous.

use nosh_core::expand::{expand, line_test, Scope};
use nosh_core::{Catalog, Command, ViewId};

use crate::parse::ParseContext;

/// Outcome of resolving a line prefix.
#[derive(Debug)]
pub enum Resolution<'a> {
    Command(&'a Command),
    /// Multiple same-coverage commands match the entered words.
    Ambiguous,
    None,
}

fn search_views(catalog: &Catalog, current: ViewId) -> Vec<ViewId> {
    let mut views = vec![current];
    if let Some(global) = catalog.global() {
        if global != current {
            views.push(global);
        }
    }
    views
}

/// Resolve the command whose name the line's leading words cover,
/// ignoring test expressions.
pub fn resolve_prefix<'a>(
    ctx: &ParseContext<'a, '_>,
    current: ViewId,
    words: &[&str],
) -> Resolution<'a> {
    let mut candidates: Vec<&'a Command> = Vec::new();
    for view in search_views(ctx.catalog, current) {
        candidates.extend(ctx.catalog.view(view).resolve_all(words));
    }
    let Some(best_words) = candidates.iter().map(|c| c.word_count()).max() else {
        return Resolution::None;
    };
    candidates.retain(|c| c.word_count() == best_words);

    // An exact word-for-word name beats abbreviations of its siblings.
    if let Some(exact) = candidates.iter().find(|c| {
        c.words()
            .zip(words)
            .all(|(name, input)| name.eq_ignore_ascii_case(input))
    }) {
        return Resolution::Command(exact);
    }

    let first = candidates[0];
    if candidates.iter().any(|c| c.name() != first.name()) {
        return Resolution::Ambiguous;
    }
    Resolution::Command(first)
}

/// Resolve and gate on the command's test expression.
pub fn resolve_command<'a>(
    ctx: &ParseContext<'a, '_>,
    current: ViewId,
    words: &[&str],
) -> Resolution<'a> {
    match resolve_prefix(ctx, current, words) {
        Resolution::Command(cmd) if !command_test(ctx, cmd) => Resolution::None,
        other => other,
    }
}

/// Evaluate a command's test expression against the session scope.
pub fn command_test(ctx: &ParseContext<'_, '_>, cmd: &Command) -> bool {
    let Some(test) = &cmd.test else { return true };
    let scope = Scope::new(ctx.catalog).with_frames(ctx.frames);
    match expand(test, &scope) {
        Ok(expanded) => line_test(&expanded),
        Err(_) => false,
    }
}

/// Commands visible to help/completion that extend the line, paired with
/// the next word each contributes. Deduplicated by word, current view
/// first.
pub fn next_completions<'a>(
    ctx: &ParseContext<'a, '_>,
    current: ViewId,
    complete: &[&str],
    partial: Option<&str>,
) -> Vec<(&'a Command, &'a str)> {
    let mut out: Vec<(&'a Command, &'a str)> = Vec::new();
    for view in search_views(ctx.catalog, current) {
        for (cmd, word) in ctx.catalog.view(view).completions(complete, partial) {
            if cmd.hidden || !cmd.enabled || !command_test(ctx, cmd) {
                continue;
            }
            if out.iter().any(|(_, seen)| *seen == word) {
                continue;
            }
            out.push((cmd, word));
        }
    }
    out
}

/// Byte column where the line stops resolving: the longest prefix that
/// still has a command completion.
pub fn divergence_column(ctx: &ParseContext<'_, '_>, current: ViewId, line: &str) -> usize {
    let mut end = line.trim_end().len();
    while end > 0 {
        end -= 1;
        if !line.is_char_boundary(end) {
            continue;
        }
        let prefix = &line[..end];
        let argv = crate::args::Args::parse(prefix);
        let words = argv.words();
        let (complete, partial) = if prefix.ends_with(char::is_whitespace) || words.is_empty() {
            (&words[..], None)
        } else {
            (&words[..words.len() - 1], Some(words[words.len() - 1]))
        };
        if !next_completions(ctx, current, complete, partial).is_empty() {
            break;
        }
    }
    end
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
