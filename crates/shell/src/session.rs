// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One interactive session: the view stack, command dispatch, and the
//! operator-facing error surfaces.
//!
//! The catalog is read-only and shared; the stack, variables, and
//! per-line state belong to the session. View-stack changes take effect
//! after the action returns, so the next prompt reflects the new view.

use std::path::PathBuf;

use indexmap::IndexMap;

use nosh_core::expand::{expand, Scope};
use nosh_core::ptype::MethodKind;
use nosh_core::{Catalog, Command, ParsedArgs, RestorePolicy, ViewId};

use crate::action::{
    acquire_lock, block_interrupts, unblock_interrupts, ActionContext, ActionOutput,
    ActionRegistry, Hooks,
};
use crate::args::Args;
use crate::complete::{complete_line, Completion};
use crate::error::ShellError;
use crate::help::{help_line, HelpPage};
use crate::parse::{parse_line, ParseContext, ParseResult, ParseStatus};
use crate::resolve::{divergence_column, resolve_command, Resolution};

/// Session-wide switches, mostly from the command line.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub dry_run: bool,
    pub lockless: bool,
    pub lock_path: Option<PathBuf>,
    /// Expose regexp-select alternate naming.
    pub use_alt_name: bool,
}

/// How the last executed line ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Ok,
    SyntaxError,
    ScriptError,
    SystemError,
}

/// Result of executing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Blank line.
    Empty,
    /// The action ran; nonzero code means script error.
    Done { code: i32, out: Option<String> },
    /// The session was asked to close.
    Closed,
}

pub struct Session<'c> {
    catalog: &'c Catalog,
    /// View stack; parallel to `vars`. Never empty.
    stack: Vec<ViewId>,
    /// Expanded view-id variables per frame.
    vars: Vec<IndexMap<String, String>>,
    actions: ActionRegistry,
    hooks: Hooks,
    options: SessionOptions,
    state: LineState,
    /// Set while the previous keypress was also help.
    helping: bool,
}

impl<'c> Session<'c> {
    pub fn new(catalog: &'c Catalog, start: ViewId, options: SessionOptions) -> Self {
        Self {
            catalog,
            stack: vec![start],
            vars: vec![IndexMap::new()],
            actions: ActionRegistry::new(),
            hooks: Hooks::default(),
            options,
            state: LineState::Ok,
            helping: false,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn actions_mut(&mut self) -> &mut ActionRegistry {
        &mut self.actions
    }

    pub fn set_hooks(&mut self, hooks: Hooks) {
        self.hooks = hooks;
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    pub fn current_view(&self) -> ViewId {
        *self.stack.last().unwrap_or(&self.stack[0])
    }

    /// Stack depth below the top frame.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    fn parse_ctx(&self) -> ParseContext<'c, '_> {
        ParseContext {
            catalog: self.catalog,
            frames: &self.vars,
            use_alt_name: self.options.use_alt_name,
        }
    }

    /// Render the current prompt from the top view's template.
    pub fn prompt(&self) -> String {
        let view = self.catalog.view(self.current_view());
        let scope = Scope::new(self.catalog).with_frames(&self.vars);
        expand(&view.prompt, &scope).unwrap_or_else(|_| String::from("> "))
    }

    /// Help page for a line; the second consecutive request on the same
    /// single-row page also carries the detail text.
    pub fn help(&mut self, line: &str) -> HelpPage {
        let mut page = help_line(&self.parse_ctx(), self.current_view(), line);
        page.show_detail = page.rows.len() == 1 && self.helping;
        self.helping = !self.helping;
        page
    }

    /// Tab completion for a line.
    pub fn complete(&self, line: &str) -> Completion {
        complete_line(&self.parse_ctx(), self.current_view(), line)
    }

    /// Completion rounds the enter key may take while the line keeps
    /// growing (one word completed per round).
    const COMPLETION_ROUNDS: u8 = 4;

    /// Execute one line.
    pub fn execute(&mut self, line: &str) -> Result<ExecOutcome, ShellError> {
        self.helping = false;
        let result = self.execute_inner(line, Self::COMPLETION_ROUNDS);
        self.state = match &result {
            Ok(ExecOutcome::Done { code, .. }) if *code != 0 => LineState::ScriptError,
            Ok(_) => LineState::Ok,
            Err(ShellError::System(_)) | Err(ShellError::Expand(_)) => LineState::SystemError,
            Err(ShellError::ScriptError { .. }) => LineState::ScriptError,
            Err(_) => LineState::SyntaxError,
        };
        result
    }

    fn execute_inner(&mut self, line: &str, rounds: u8) -> Result<ExecOutcome, ShellError> {
        let argv = Args::parse(line);
        if argv.is_empty() {
            return Ok(ExecOutcome::Empty);
        }
        let words = argv.words();
        let current = self.current_view();

        let resolution = {
            let ctx = self.parse_ctx();
            resolve_command(&ctx, current, &words)
        };
        let cmd: &'c Command = match resolution {
            Resolution::Command(cmd) => cmd,
            Resolution::Ambiguous => return Err(ShellError::AmbiguousCommand),
            Resolution::None => return self.resolve_via_completion(line, rounds),
        };

        let result: ParseResult<'c> = {
            let ctx = self.parse_ctx();
            parse_line(&ctx, cmd, &argv, 0, None)
        };
        match result.status {
            ParseStatus::Ok => {}
            ParseStatus::Partial => return Err(ShellError::PartialCommand),
            ParseStatus::BadParam => {
                return Err(ShellError::BadParameter {
                    column: self.error_column(line, &argv, &result),
                    range: self.failed_range(&result.pargs),
                })
            }
            ParseStatus::BadCommand | ParseStatus::BadHistory => {
                return Err(ShellError::UnknownCommand {
                    column: self.error_column(line, &argv, &result),
                })
            }
        }

        self.run_command(cmd, result.pargs)
    }

    /// The enter-key fallback: when nothing resolves, a unique completion
    /// of the word under the cursor is substituted and the line retried,
    /// one word per round. Several completions make the line ambiguous.
    fn resolve_via_completion(
        &mut self,
        line: &str,
        rounds: u8,
    ) -> Result<ExecOutcome, ShellError> {
        if rounds > 0 {
            let completion = {
                let ctx = self.parse_ctx();
                complete_line(&ctx, self.current_view(), line)
            };
            match completion {
                Completion::Unique(word) => {
                    let completed = replace_last_word(line, &word);
                    if completed != line {
                        return self.execute_inner(&completed, rounds - 1);
                    }
                }
                Completion::Ambiguous { .. } => return Err(ShellError::AmbiguousCommand),
                Completion::None => {}
            }
        }
        let column = divergence_column(&self.parse_ctx(), self.current_view(), line);
        Err(ShellError::UnknownCommand { column })
    }

    fn run_command(
        &mut self,
        cmd: &'c Command,
        pargs: ParsedArgs<'c>,
    ) -> Result<ExecOutcome, ShellError> {
        let span = tracing::info_span!(
            "shell.cmd",
            cmd = %cmd.name(),
            exit_code = tracing::field::Empty,
        );
        let _guard = span.enter();

        // Pre-change the stack when the command belongs to an outer view.
        match cmd.restore {
            RestorePolicy::View => {
                if self.stack.contains(&cmd.view) {
                    while self.current_view() != cmd.view && self.stack.len() > 1 {
                        self.stack.pop();
                        self.vars.pop();
                    }
                }
            }
            RestorePolicy::Depth => {
                let keep = cmd.depth + 1;
                if self.stack.len() > keep {
                    self.stack.truncate(keep);
                    self.vars.truncate(keep);
                }
            }
            RestorePolicy::None => {}
        }

        // Expand the action script against the restored frames.
        let script = match &cmd.action.script {
            Some(template) => {
                let scope = Scope::new(self.catalog)
                    .with_bindings(&pargs)
                    .with_frames(&self.vars);
                expand(template, &scope)?
            }
            None => String::new(),
        };

        let lock = if cmd.action.lock
            && !self.options.lockless
            && !cmd.action.is_empty()
        {
            match &self.options.lock_path {
                Some(path) => Some(acquire_lock(path).map_err(ShellError::System)?),
                None => None,
            }
        } else {
            None
        };

        let closing = cmd.action.builtin.as_deref() == Some("close");
        let output = self.run_action(cmd, script)?;
        span.record("exit_code", output.code);

        if output.code == 0 {
            self.hooks.run_config(self.options.dry_run);
        }
        let full_line = canonical_line(cmd, &pargs);
        self.hooks
            .run_log(self.options.dry_run, &full_line, output.code);
        drop(lock);

        if closing {
            return Ok(ExecOutcome::Closed);
        }

        // Move into the new view; a matched parameter's target overrides
        // the command's.
        if output.code == 0 {
            let mut viewname = cmd.viewname.clone();
            let mut viewid = cmd.viewid.clone();
            for arg in pargs.iter() {
                if let Some(view) = &arg.param.view {
                    viewname = Some(view.clone());
                }
                if let Some(id) = &arg.param.viewid {
                    viewid = Some(id.clone());
                }
            }
            if let Some(template) = viewname {
                let (target, frame);
                {
                    let scope = Scope::new(self.catalog)
                        .with_bindings(&pargs)
                        .with_frames(&self.vars);
                    let name = expand(&template, &scope)?;
                    target = self.catalog.find_view(&name);
                    frame = match &viewid {
                        Some(assignments) => parse_viewid(&expand(assignments, &scope)?),
                        None => IndexMap::new(),
                    };
                    if target.is_none() {
                        tracing::warn!(view = %name, "command names an unknown view");
                    }
                }
                if let Some(target) = target {
                    self.stack.push(target);
                    self.vars.push(frame);
                }
            }
        }

        Ok(ExecOutcome::Done {
            code: output.code,
            out: output.out,
        })
    }

    fn run_action(&self, cmd: &Command, script: String) -> Result<ActionOutput, ShellError> {
        let builtin = cmd.action.builtin.as_deref();
        if matches!(builtin, Some("close") | Some("nop")) {
            return Ok(ActionOutput::default());
        }
        if self.options.dry_run && !cmd.action.permanent {
            return Ok(ActionOutput::default());
        }
        let ctx = ActionContext {
            command: cmd.name().to_string(),
            script,
            dry_run: self.options.dry_run,
        };
        let blocked = if cmd.action.interrupt {
            None
        } else {
            Some(block_interrupts().map_err(ShellError::System)?)
        };
        let result = self.actions.run(builtin, &ctx);
        if let Some(set) = &blocked {
            unblock_interrupts(set);
        }
        result.map_err(ShellError::System)
    }

    /// Caret column for a failed line: the parser's divergence point or
    /// the longest still-resolvable prefix, whichever is further right.
    fn error_column(&self, line: &str, argv: &Args, result: &ParseResult<'_>) -> usize {
        let scanned = divergence_column(&self.parse_ctx(), self.current_view(), line);
        scanned.max(result.error_column(argv))
    }

    /// Range of the failing parameter when it is integer-typed, for the
    /// out-of-range message.
    fn failed_range(&self, pargs: &ParsedArgs<'_>) -> Option<String> {
        let failed = pargs.last()?;
        let ptype = self.catalog.ptype(failed.param.ptype);
        match ptype.kind() {
            MethodKind::Integer | MethodKind::UnsignedInteger => {
                ptype.range().map(str::to_string)
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("stack", &self.stack)
            .field("state", &self.state)
            .finish()
    }
}

/// The canonicalised display line: command name plus bound values in
/// order, switch containers elided.
pub fn canonical_line(cmd: &Command, pargs: &ParsedArgs<'_>) -> String {
    let mut out = cmd.name().to_string();
    for arg in pargs.iter() {
        if arg.param.is_switch() {
            continue;
        }
        out.push(' ');
        out.push_str(&arg.value);
    }
    out
}

/// Parse `name=value;name=value` view-id assignments.
fn parse_viewid(assignments: &str) -> IndexMap<String, String> {
    let mut vars = IndexMap::new();
    for part in assignments.split(';') {
        if let Some((name, value)) = part.split_once('=') {
            let name = name.trim();
            if !name.is_empty() {
                vars.insert(name.to_string(), value.trim().to_string());
            }
        }
    }
    vars
}

/// Replace the word under the cursor with its completion.
fn replace_last_word(line: &str, word: &str) -> String {
    if line.is_empty() || line.ends_with(char::is_whitespace) {
        return format!("{line}{word} ");
    }
    let start = line
        .rfind(char::is_whitespace)
        .map(|i| i + 1)
        .unwrap_or(0);
    format!("{}{word} ", &line[..start])
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
