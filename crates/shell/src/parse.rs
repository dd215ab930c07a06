// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The central line parser.
//!
//! Walks a resolved command's parameter tree positionally over the split
//! line: gates each parameter by its test expression, validates tokens,
//! records bindings, harvests help/completion candidates at the cursor
//! token, and reports where matching diverged on failure.

use indexmap::IndexMap;

use nosh_core::expand::{expand, line_test, Scope};
use nosh_core::ptype::{common_prefix_nocase, starts_with_nocase, HelpStyle, MethodKind};
use nosh_core::{Catalog, Command, Param, ParamMode, ParamType, ParamVec, ParsedArgs};

use crate::args::Args;

/// Commands whose name starts with this render interface types by item
/// name rather than by range enumeration.
const IFACE_CMD: &str = "interface";

/// Result classes of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// Fully bound; the command may execute.
    Ok,
    /// Non-optional parameters still missing: await more input.
    Partial,
    /// Leftover tokens no parameter can consume.
    BadCommand,
    /// A token failed validation.
    BadParam,
    /// The editor's history expansion failed.
    BadHistory,
}

/// Immutable inputs shared by one parse.
///
/// The catalog borrow outlives the frames borrow so parse results can
/// survive view-stack mutation.
pub struct ParseContext<'a, 'f> {
    pub catalog: &'a Catalog,
    /// View-stack variable frames, bottom first.
    pub frames: &'f [IndexMap<String, String>],
    /// Switch regexp-select types onto their alternate naming.
    pub use_alt_name: bool,
}

/// One help/completion candidate harvested at the cursor position.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub param: &'a Param,
    /// The partial token under the cursor, if any.
    pub token: Option<String>,
    pub style: HelpStyle,
}

/// Collected candidates; one entry per parameter name, first wins.
#[derive(Debug, Default)]
pub struct Collector<'a> {
    entries: Vec<Candidate<'a>>,
}

impl<'a> Collector<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, param: &'a Param, token: Option<&str>, style: HelpStyle) {
        if self.entries.iter().any(|c| c.param.name() == param.name()) {
            return;
        }
        self.entries.push(Candidate {
            param,
            token: token.map(str::to_string),
            style,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate<'a>> {
        self.entries.iter()
    }
}

/// Outcome of [`parse_line`].
#[derive(Debug)]
pub struct ParseResult<'a> {
    pub status: ParseStatus,
    pub pargs: ParsedArgs<'a>,
    /// Token index where matching diverged, for failures.
    pub err_index: usize,
    /// Matched length inside the failing token.
    pub match_len: usize,
}

impl ParseResult<'_> {
    /// Byte column of the `^` marker for this failure.
    pub fn error_column(&self, argv: &Args) -> usize {
        argv.offset(self.err_index).unwrap_or(argv.line_len()) + self.match_len
    }
}

/// Parse a split line against a resolved command.
///
/// `need_index` is the token the cursor sits on when help or completion
/// is being harvested into `collector`; plain execution passes zero and
/// no collector.
pub fn parse_line<'a>(
    ctx: &ParseContext<'a, '_>,
    cmd: &'a Command,
    argv: &Args,
    need_index: usize,
    mut collector: Option<&mut Collector<'a>>,
) -> ParseResult<'a> {
    let mut pargs = ParsedArgs::new();
    let mut walker = Walker {
        ctx,
        cmd,
        argv,
        need_index,
        idx: cmd.word_count(),
        err_index: 0,
        match_len: 0,
    };
    let status = walker.run(&mut pargs, &cmd.params, &mut collector, true);
    ParseResult {
        status,
        pargs,
        err_index: walker.err_index,
        match_len: walker.match_len,
    }
}

struct Walker<'a, 'w> {
    ctx: &'w ParseContext<'a, 'w>,
    cmd: &'a Command,
    argv: &'w Args,
    need_index: usize,
    /// Current token index.
    idx: usize,
    err_index: usize,
    match_len: usize,
}

impl<'a> Walker<'a, '_> {
    fn run(
        &mut self,
        pargs: &mut ParsedArgs<'a>,
        params: &'a ParamVec,
        collector: &mut Option<&mut Collector<'a>>,
        top_level: bool,
    ) -> ParseStatus {
        let argc = self.argv.len();
        let mut index = 0usize;
        // Last consumed non-optional position; unordered optionals rewind
        // to just past it.
        let mut nopt_index: Option<usize> = None;

        while index < params.len() {
            let Some(param) = params.get(index) else {
                return ParseStatus::BadParam;
            };
            if self.idx <= argc {
                self.err_index = self.idx;
            }
            let arg = self.argv.get(self.idx);

            if !self.param_test(param, pargs) {
                index += 1;
                continue;
            }

            if let Some(last) = collector.as_deref_mut() {
                if (self.idx == self.need_index || self.past_token_help(param, arg))
                    && pargs.find(param.name()).is_none()
                {
                    self.harvest(param, arg, pargs, last);
                }
            }

            if !param.optional {
                nopt_index = Some(index);
            }

            let mut chosen: Option<&'a Param> = None;
            let mut rec_params: &'a ParamVec = &param.params;
            let validated = if pargs.find(param.name()).is_some() {
                // Duplicated parameter
                None
            } else if param.is_switch() {
                let mut found = None;
                for child in &param.params {
                    if !self.param_test(child, pargs) {
                        continue;
                    }
                    match self.validate_one(child, arg) {
                        Some(value) => {
                            chosen = Some(child);
                            rec_params = &child.params;
                            found = Some(value);
                            break;
                        }
                        None => self.note_mismatch(child, arg),
                    }
                }
                found
            } else {
                let value = self.validate_one(param, arg);
                if value.is_none() {
                    self.note_mismatch(param, arg);
                }
                value
            };

            if let Some(value) = validated {
                if param.is_switch() {
                    let Some(child) = chosen else {
                        return ParseStatus::BadParam;
                    };
                    // A repeated alternative name surfaces as a duplicate
                    // in the chosen child's own subtree, not here.
                    let _ = pargs.insert(param, child.name());
                    let _ = pargs.insert(child, value);
                } else if pargs.insert(param, value).is_err() {
                    return ParseStatus::BadParam;
                }

                // Keep the cursor anchored on the last unfinished optional
                // argument so help stays addressed to it.
                let anchored = param.optional
                    && self.idx == self.need_index
                    && self.need_index + 1 == argc;
                if !anchored {
                    self.idx += 1;
                    if !rec_params.is_empty() {
                        let status = self.run(pargs, rec_params, collector, false);
                        if status != ParseStatus::Ok {
                            return status;
                        }
                    }
                }

                if param.optional && !param.order {
                    index = nopt_index.map_or(0, |i| i + 1);
                } else {
                    nopt_index = Some(index);
                    index += 1;
                }
            } else if param.optional {
                index += 1;
            } else if arg.is_none() {
                break;
            } else {
                // Record the failing parameter for the caller's message.
                let _ = pargs.insert(param, param.name());
                return ParseStatus::BadParam;
            }
        }

        // Non-optional parameters without values?
        if self.idx >= argc
            && index < params.len()
            && params.iter().skip(index).any(|p| !p.optional)
        {
            return ParseStatus::Partial;
        }

        if top_level {
            // Tokens beyond the parameter tree belong to the catch-all.
            if let Some(last) = collector.as_deref_mut() {
                if let Some(args_param) = &self.cmd.args {
                    if last.is_empty()
                        && self.idx <= argc
                        && index >= params.len()
                        && self.need_index != 0
                    {
                        last.push(args_param, Some(""), HelpStyle::Name);
                    }
                }
            }
            if self.idx < argc && index >= params.len() {
                let Some(args_param) = &self.cmd.args else {
                    return ParseStatus::BadCommand;
                };
                let joined = self.argv.requote_from(self.idx);
                if pargs.insert(args_param, joined).is_err() {
                    return ParseStatus::BadParam;
                }
                self.idx = argc;
            }
        }

        ParseStatus::Ok
    }

    fn ptype(&self, param: &Param) -> &'a ParamType {
        self.ctx.catalog.ptype(param.ptype)
    }

    fn param_test(&self, param: &Param, pargs: &ParsedArgs<'a>) -> bool {
        let Some(test) = &param.test else { return true };
        let scope = Scope::new(self.ctx.catalog)
            .with_bindings(pargs)
            .with_frames(self.ctx.frames);
        match expand(test, &scope) {
            Ok(expanded) => line_test(&expanded),
            Err(_) => false,
        }
    }

    /// Validate one parameter against the current token, consuming a
    /// second token when a regexp-select only matches the concatenation
    /// (`ethernet 0/1` as `ethernet0/1`).
    fn validate_one(&mut self, param: &'a Param, arg: Option<&str>) -> Option<String> {
        let arg = arg?;
        if let Some(value) = self.param_validate(param, arg) {
            return Some(value);
        }
        if self.ptype(param).kind() == MethodKind::RegexpSelect && self.idx + 1 < self.argv.len()
        {
            let joined = format!("{arg}{}", self.argv.get(self.idx + 1).unwrap_or(""));
            if let Some(value) = self.param_validate(param, &joined) {
                self.idx += 1;
                return Some(value);
            }
        }
        None
    }

    fn param_validate(&self, param: &Param, token: &str) -> Option<String> {
        let ptype = self.ptype(param);
        if param.mode == ParamMode::Subcommand && ptype.kind() != MethodKind::RegexpSelect {
            if !param.effective_value().eq_ignore_ascii_case(token) {
                return None;
            }
            return Some(param.effective_value().to_string());
        }
        ptype.validate(token, self.ctx.use_alt_name)
    }

    /// Track how far into the failing token matching got, for the caret.
    fn note_mismatch(&mut self, param: &Param, arg: Option<&str>) {
        let Some(arg) = arg else { return };
        let ptype = self.ptype(param);
        match ptype.kind() {
            MethodKind::RegexpSelect => {
                if ptype.matches_item_prefix(arg, self.ctx.use_alt_name) {
                    // The item prefix matched; the divergence is in the
                    // following token.
                    if self.idx + 1 < self.argv.len() {
                        self.err_index = self.idx + 1;
                        self.match_len = 0;
                    }
                } else {
                    self.match_len = self
                        .match_len
                        .max(ptype.longest_item_match(arg, self.ctx.use_alt_name));
                }
            }
            MethodKind::Select => {
                self.match_len = self
                    .match_len
                    .max(ptype.longest_item_match(arg, self.ctx.use_alt_name));
            }
            _ => {
                self.match_len = self
                    .match_len
                    .max(common_prefix_nocase(param.effective_value(), arg));
            }
        }
    }

    /// Help also fires one past a matched regexp-select token, so
    /// `interface vlan ?` shows the type's contextual rows. For a switch
    /// this requires a regexp-select child whose items the current token
    /// prefixes.
    fn past_token_help(&self, param: &Param, arg: Option<&str>) -> bool {
        if self.idx + 1 != self.need_index {
            return false;
        }
        if self.ptype(param).kind() == MethodKind::RegexpSelect {
            return true;
        }
        if param.is_switch() {
            for child in &param.params {
                if !matches!(child.mode, ParamMode::Subcommand | ParamMode::Common) {
                    continue;
                }
                let ptype = self.ptype(child);
                if ptype.kind() == MethodKind::RegexpSelect {
                    if let Some(arg) = arg {
                        if ptype.matches_item_prefix(arg, self.ctx.use_alt_name) {
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    /// Presentation for a harvested regexp-select candidate.
    fn select_style(&self, ptype: &ParamType) -> HelpStyle {
        let past_token = self.idx + 1 == self.need_index;
        if self.cmd.name().starts_with(IFACE_CMD) {
            if past_token {
                HelpStyle::Value
            } else {
                HelpStyle::Name
            }
        } else if past_token {
            HelpStyle::Value
        } else if ptype.items(self.ctx.use_alt_name).len() > 1 {
            HelpStyle::Range
        } else {
            HelpStyle::Name
        }
    }

    /// Emit the candidates visible at the cursor position.
    fn harvest(
        &self,
        param: &'a Param,
        arg: Option<&str>,
        pargs: &ParsedArgs<'a>,
        last: &mut Collector<'a>,
    ) {
        if param.is_switch() {
            // Keywords shadow positional alternatives: a non-keyword
            // branch is shown only when no keyword matched the token.
            let mut keyword_match = false;
            for child in &param.params {
                if !self.param_test(child, pargs) {
                    continue;
                }
                let ptype = self.ptype(child);
                let is_rsel = ptype.kind() == MethodKind::RegexpSelect;
                let keyword_family = child.mode == ParamMode::Subcommand
                    || (child.mode == ParamMode::Common && is_rsel);
                if keyword_family {
                    if self.harvest_keyword(child, arg, last) && arg.is_some() {
                        keyword_match = true;
                    }
                } else if self.idx == self.need_index && !keyword_match {
                    last.push(child, arg, HelpStyle::Name);
                }
            }
        } else {
            let ptype = self.ptype(param);
            let keyword_family = param.mode == ParamMode::Subcommand
                || (param.mode == ParamMode::Common
                    && ptype.kind() == MethodKind::RegexpSelect);
            if keyword_family {
                self.harvest_keyword(param, arg, last);
            } else {
                last.push(param, arg, HelpStyle::Name);
            }
        }
    }

    /// Emit a subcommand or regexp-select candidate when the token
    /// prefixes its keyword or one of its item names. Returns whether a
    /// row was emitted.
    fn harvest_keyword(
        &self,
        param: &'a Param,
        arg: Option<&str>,
        last: &mut Collector<'a>,
    ) -> bool {
        let ptype = self.ptype(param);
        if ptype.kind() != MethodKind::RegexpSelect {
            let matched =
                arg.is_none_or(|a| starts_with_nocase(param.effective_value(), a));
            if matched {
                last.push(param, arg, HelpStyle::Name);
            }
            return matched;
        }
        for item in ptype.items(self.ctx.use_alt_name) {
            if arg.is_none_or(|a| starts_with_nocase(&item.name, a)) {
                if self.idx == self.need_index || self.idx + 1 == self.need_index {
                    last.push(param, arg, self.select_style(ptype));
                    return true;
                }
                return false;
            }
        }
        false
    }
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "parse_props.rs"]
mod props;
