// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line drivers: the interactive loop and batch execution.
//!
//! The engine stays line-based here; the full keystroke editor is an
//! external concern. A trailing `?` asks for help, anything else
//! executes. Batch input annotates errors with file and line number.

use std::io::{BufRead, Write};

use nosh_shell::{ExecOutcome, Session, ShellError};

use crate::Fatal;

pub struct Driver<'c> {
    session: Session<'c>,
    quiet: bool,
    stop_on_error: bool,
    /// Exit code of the worst error seen so far.
    worst: i32,
}

impl<'c> Driver<'c> {
    pub fn new(session: Session<'c>, quiet: bool, stop_on_error: bool) -> Self {
        Self {
            session,
            quiet,
            stop_on_error,
            worst: 0,
        }
    }

    /// Final process exit code for this run.
    pub fn exit_code(&self) -> i32 {
        self.worst
    }

    /// Handle one line. Returns false when the session closed.
    pub fn run_line(
        &mut self,
        line: &str,
        origin: Option<(&str, usize)>,
    ) -> Result<bool, Fatal> {
        let line = line.trim_end();

        if let Some(stripped) = line.strip_suffix('?') {
            let page = self.session.help(stripped);
            if !page.is_empty() {
                eprint!("{}", page.render());
                if page.show_detail {
                    if let Some(detail) = page.sole_detail() {
                        eprintln!("{detail}");
                    }
                }
            }
            return Ok(true);
        }

        match self.session.execute(line) {
            Ok(ExecOutcome::Closed) => Ok(false),
            Ok(ExecOutcome::Empty) => Ok(true),
            Ok(ExecOutcome::Done { code, out }) => {
                if let Some(out) = out {
                    if !self.quiet && !out.is_empty() {
                        print!("{out}");
                    }
                }
                if code != 0 {
                    self.fail(2, origin, &format!("script returned {code}"))?;
                }
                Ok(true)
            }
            Err(err) => {
                self.report(line, &err, origin);
                self.fail(err.exit_code(), origin, &err.to_string())?;
                Ok(true)
            }
        }
    }

    fn fail(
        &mut self,
        code: i32,
        origin: Option<(&str, usize)>,
        message: &str,
    ) -> Result<(), Fatal> {
        self.worst = self.worst.max(code);
        if self.stop_on_error {
            let message = match origin {
                Some((file, number)) => format!("{file}:{number}: {message}"),
                None => message.to_string(),
            };
            return Err(Fatal::Halted { code, message });
        }
        Ok(())
    }

    fn report(&self, line: &str, err: &ShellError, origin: Option<(&str, usize)>) {
        if let Some(column) = err.column() {
            eprintln!("{line}");
            eprintln!("{}^", " ".repeat(column));
        }
        match origin {
            Some((file, number)) => eprintln!("{file}:{number}: % Error: {err}"),
            None => eprintln!("% Error: {err}"),
        }
    }

    /// Prompt/read/execute until EOF or close.
    pub fn interactive(&mut self) -> Result<(), Fatal> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        loop {
            print!("{}", self.session.prompt());
            let _ = std::io::stdout().flush();
            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {
                    if !self.run_line(&line, None)? {
                        break;
                    }
                }
                Err(err) => {
                    return Err(Fatal::System(format!("read error: {err}")));
                }
            }
        }
        Ok(())
    }

    /// Execute a reader line by line, skipping blanks and `#` comments,
    /// annotating errors with `name`. Returns false when a line closed
    /// the session.
    pub fn batch(&mut self, reader: impl BufRead, name: &str) -> Result<bool, Fatal> {
        for (index, line) in reader.lines().enumerate() {
            let line = line
                .map_err(|err| Fatal::System(format!("{name}: read error: {err}")))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if !self.run_line(&line, Some((name, index + 1)))? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
#[path = "repl_tests.rs"]
mod tests;
