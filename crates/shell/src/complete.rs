// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Tab completion surface.
//!
//! Flattens the same harvest help uses into a deduplicated candidate
//! list, then reduces it to the longest common case-insensitive prefix.

use nosh_core::expand::{expand, Scope};
use nosh_core::ptype::MethodKind;
use nosh_core::{ParamMode, ViewId};

use crate::args::Args;
use crate::parse::{parse_line, Collector, ParseContext};
use crate::resolve::{next_completions, resolve_prefix, Resolution};

/// Result of a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing completes here.
    None,
    /// A single candidate: substitute it for the word under the cursor.
    Unique(String),
    /// Several candidates share at most `prefix`.
    Ambiguous {
        matches: Vec<String>,
        prefix: String,
    },
}

/// Compute the completion of the word under the cursor (line end).
pub fn complete_line<'a>(ctx: &ParseContext<'a, '_>, current: ViewId, line: &str) -> Completion {
    let argv = Args::parse(line);
    let words = argv.words();
    let ends_space = line.is_empty() || line.ends_with(char::is_whitespace);
    let (complete, partial) = if ends_space {
        (&words[..], None)
    } else {
        (&words[..words.len() - 1], Some(words[words.len() - 1]))
    };
    let text = partial.unwrap_or("");

    let mut matches: Vec<String> = Vec::new();
    for (_, word) in next_completions(ctx, current, complete, partial) {
        matches.push(word.to_string());
    }

    if let Resolution::Command(cmd) = resolve_prefix(ctx, current, &words) {
        // A line that is exactly the command name still completes as a
        // command word; parameters begin after the following space.
        let name_only = !ends_space && argv.len() == cmd.word_count();
        if !name_only && argv.len() >= cmd.word_count() {
            let mut index = argv.len() - cmd.word_count();
            if !ends_space && index > 0 {
                index -= 1;
            }
            let need_index = cmd.word_count() + index;
            // The word before the cursor: a regexp-select item already
            // matched there suppresses item completion for its tail.
            let penultimate = if ends_space {
                argv.get(argv.len().wrapping_sub(1))
            } else {
                argv.get(argv.len().wrapping_sub(2))
            };

            let mut collector = Collector::new();
            let result = parse_line(ctx, cmd, &argv, need_index, Some(&mut collector));

            for candidate in collector.iter() {
                let param = candidate.param;
                if cmd
                    .args
                    .as_ref()
                    .is_some_and(|args| std::ptr::eq(args, param))
                {
                    continue;
                }
                if param.mode == ParamMode::Switch || param.hidden {
                    continue;
                }
                let ptype = ctx.catalog.ptype(param.ptype);
                if param.mode == ParamMode::Subcommand
                    && ptype.kind() != MethodKind::RegexpSelect
                {
                    matches.push(param.effective_value().to_string());
                }
                if let Some(completion) = &param.completion {
                    let scope = Scope::new(ctx.catalog)
                        .with_bindings(&result.pargs)
                        .with_frames(ctx.frames);
                    if let Ok(expanded) = expand(completion, &scope) {
                        matches.extend(
                            expanded
                                .split_whitespace()
                                .filter(|word| word.starts_with(text))
                                .map(str::to_string),
                        );
                    }
                }
                let prev = if ptype.kind() == MethodKind::RegexpSelect {
                    penultimate
                } else {
                    None
                };
                matches.extend(ptype.completions(text, prev, ctx.use_alt_name));
            }
        }
    }

    let mut seen = Vec::new();
    matches.retain(|m| {
        if seen.contains(m) {
            false
        } else {
            seen.push(m.clone());
            true
        }
    });

    match matches.len() {
        0 => Completion::None,
        1 => Completion::Unique(matches.remove(0)),
        _ => {
            let prefix = common_prefix(&matches);
            Completion::Ambiguous { matches, prefix }
        }
    }
}

/// Longest case-insensitive common prefix, spelled as the first match.
fn common_prefix(matches: &[String]) -> String {
    let first = &matches[0];
    let mut len = first.len();
    for m in &matches[1..] {
        len = len.min(
            first
                .bytes()
                .zip(m.bytes())
                .take_while(|(a, b)| a.eq_ignore_ascii_case(b))
                .count(),
        );
    }
    while len > 0 && !first.is_char_boundary(len) {
        len -= 1;
    }
    first[..len].to_string()
}

#[cfg(test)]
#[path = "complete_tests.rs"]
mod tests;
