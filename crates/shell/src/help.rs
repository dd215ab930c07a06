// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `?` help surface.
//!
//! Builds the parallel name/help/detail rows for a line: command
//! completions first, then the parameter candidates the parser harvests
//! at the cursor token, then a `<cr>` row when the line already parses.

use nosh_core::ptype::{starts_with_nocase, HelpStyle, MethodKind};
use nosh_core::{Param, ParamMode, ParamType, ViewId};

use crate::args::Args;
use crate::parse::{parse_line, Collector, ParseContext, ParseStatus};
use crate::resolve::{next_completions, resolve_command, Resolution};

/// Row name of the end-of-command marker.
pub const CR_MARKER: &str = "<cr>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpRow {
    pub name: String,
    pub help: Option<String>,
    pub detail: Option<String>,
}

/// Ordered help rows for one line.
#[derive(Debug, Default)]
pub struct HelpPage {
    pub rows: Vec<HelpRow>,
    /// The line parses completely; the final row is `<cr>`.
    pub complete: bool,
    /// Set by the session when a repeated request should also print the
    /// sole row's detail text.
    pub show_detail: bool,
}

impl HelpPage {
    fn push(&mut self, name: impl Into<String>, help: Option<String>, detail: Option<String>) {
        self.rows.push(HelpRow {
            name: name.into(),
            help,
            detail,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Detail text shown when the page narrowed to a single entry.
    pub fn sole_detail(&self) -> Option<&str> {
        match &self.rows[..] {
            [row] => row.detail.as_deref(),
            _ => None,
        }
    }

    /// Case-insensitive sort by name, keeping a trailing `<cr>` last.
    fn sort(&mut self) {
        let sortable = if self.complete && !self.rows.is_empty() {
            self.rows.len() - 1
        } else {
            self.rows.len()
        };
        self.rows[..sortable].sort_by(|a, b| {
            a.name
                .to_ascii_lowercase()
                .cmp(&b.name.to_ascii_lowercase())
        });
    }

    /// Two columns padded to the widest name.
    pub fn render(&self) -> String {
        let width = self
            .rows
            .iter()
            .map(|row| row.name.len())
            .max()
            .unwrap_or(0);
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&format!(
                "  {:<width$}  {}\n",
                row.name,
                row.help.as_deref().unwrap_or(""),
            ));
        }
        out
    }
}

/// Build the help page for a line in the given view.
pub fn help_line<'a>(ctx: &ParseContext<'a, '_>, current: ViewId, line: &str) -> HelpPage {
    let mut page = HelpPage::default();
    let argv = Args::parse(line);
    let words = argv.words();

    // First pass: command completions.
    let (complete, partial) = if line.ends_with(char::is_whitespace) || words.is_empty() {
        (&words[..], None)
    } else {
        (&words[..words.len() - 1], Some(words[words.len() - 1]))
    };
    for (cmd, word) in next_completions(ctx, current, complete, partial) {
        page.push(word, cmd.text.clone(), cmd.detail.clone());
    }

    // Second pass: parameter candidates of the resolved command.
    if let Resolution::Command(cmd) = resolve_command(ctx, current, &words) {
        let mut index = argv.len();
        if index > 0 {
            if !line.ends_with(char::is_whitespace) {
                index -= 1;
            }
            let mut collector = Collector::new();
            let result = parse_line(ctx, cmd, &argv, index, Some(&mut collector));
            for candidate in collector.iter() {
                if candidate.param.hidden {
                    continue;
                }
                param_help(
                    ctx,
                    candidate.param,
                    candidate.token.as_deref(),
                    candidate.style,
                    &mut page,
                );
            }
            if result.status == ParseStatus::Ok {
                page.complete = true;
                page.push(CR_MARKER, None, None);
            }
        }
    }

    page.sort();
    page
}

/// Render one harvested parameter into help rows.
fn param_help(
    ctx: &ParseContext<'_, '_>,
    param: &Param,
    pval: Option<&str>,
    style: HelpStyle,
    page: &mut HelpPage,
) {
    if param.is_switch() {
        for child in &param.params {
            param_help(ctx, child, pval, style, page);
        }
        return;
    }

    let ptype = ctx.catalog.ptype(param.ptype);
    match ptype.kind() {
        MethodKind::RegexpSelect => {
            regexp_select_help(ctx, param, ptype, pval, style, page);
        }
        MethodKind::Select if ptype.has_ext_help() => {
            for (i, item) in ptype.items(ctx.use_alt_name).iter().enumerate() {
                if pval.is_some_and(|p| !starts_with_nocase(&item.name, p)) {
                    continue;
                }
                page.push(
                    item.name.clone(),
                    ptype.ext_help(i).map(str::to_string),
                    None,
                );
            }
        }
        _ => {
            let name = if param.mode == ParamMode::Subcommand {
                param.effective_value().to_string()
            } else {
                match ptype.range() {
                    Some(range) => format!("<{range}>"),
                    None => ptype.text().to_string(),
                }
            };
            page.push(name, param.text.clone(), None);
        }
    }
}

fn regexp_select_help(
    ctx: &ParseContext<'_, '_>,
    param: &Param,
    ptype: &ParamType,
    pval: Option<&str>,
    style: HelpStyle,
    page: &mut HelpPage,
) {
    let items = ptype.items(ctx.use_alt_name);
    match style {
        HelpStyle::Name => {
            for item in items {
                if pval.is_some_and(|p| !starts_with_nocase(&item.name, p)) {
                    continue;
                }
                page.push(item.name.clone(), param.text.clone(), None);
            }
        }
        HelpStyle::Value => {
            if let Some(item) = items
                .iter()
                .find(|item| pval.is_none_or(|p| starts_with_nocase(&item.name, p)))
            {
                page.push(format!("<{}>", item.value()), param.text.clone(), None);
            }
        }
        HelpStyle::Range => match pval {
            Some(p) => {
                if let Some((i, item)) = items
                    .iter()
                    .enumerate()
                    .find(|(_, item)| starts_with_nocase(&item.name, p))
                {
                    let help = ptype
                        .ext_help(i)
                        .map(str::to_string)
                        .or_else(|| param.text.clone());
                    page.push(item.name.clone(), help, None);
                }
            }
            None => {
                for (i, item) in items.iter().enumerate() {
                    page.push(
                        item.name.clone(),
                        ptype.ext_help(i).map(str::to_string),
                        None,
                    );
                }
            }
        },
    }
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
