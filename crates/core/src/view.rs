// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Views: named command modes with a prompt template.
//!
//! Matching here is purely lexical and abbreviation-aware: each input word
//! may abbreviate the corresponding command-name word. Test-expression
//! gating and the current/global merge happen a level up, in the session.

use crate::command::Command;
use crate::ptype::starts_with_nocase;

/// A named collection of commands plus a prompt template.
#[derive(Debug, Clone)]
pub struct View {
    name: String,
    pub prompt: String,
    /// Nesting depth commands declared here inherit.
    pub depth: usize,
    commands: Vec<Command>,
}

impl View {
    pub fn new(name: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt: prompt.into(),
            depth: 0,
            commands: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// The registered command best covering the line: every command-name
    /// word abbreviated by the corresponding input word. Longest coverage
    /// wins; ties keep registration order.
    pub fn resolve(&self, words: &[&str]) -> Option<&Command> {
        self.commands
            .iter()
            .filter(|cmd| covers(cmd, words))
            .max_by_key(|cmd| (cmd.word_count(), cmd.name().len()))
    }

    /// All commands covering the line, for ambiguity detection.
    pub fn resolve_all<'v>(&'v self, words: &[&str]) -> Vec<&'v Command> {
        self.commands
            .iter()
            .filter(|cmd| covers(cmd, words))
            .collect()
    }

    /// Commands whose name extends the line, with the word each would add
    /// next. `partial` is the in-progress last word, if the cursor does
    /// not follow a space.
    pub fn completions<'v>(
        &'v self,
        complete: &[&str],
        partial: Option<&str>,
    ) -> impl Iterator<Item = (&'v Command, &'v str)> + 'v {
        let complete: Vec<String> = complete.iter().map(|word| word.to_string()).collect();
        let partial = partial.map(str::to_string);
        self.commands.iter().filter_map(move |cmd| {
            completion_word(cmd, &complete, partial.as_deref()).map(|word| (cmd, word))
        })
    }
}

/// True when every word of the command name is abbreviated by the
/// corresponding input word.
fn covers(cmd: &Command, words: &[&str]) -> bool {
    let count = cmd.word_count();
    if count == 0 || count > words.len() {
        return false;
    }
    cmd.words()
        .zip(words)
        .all(|(name_word, input)| starts_with_nocase(name_word, input))
}

/// The next word `cmd` would contribute after the line's complete words,
/// filtered by the in-progress partial word.
fn completion_word<'c>(
    cmd: &'c Command,
    complete: &[String],
    partial: Option<&str>,
) -> Option<&'c str> {
    if cmd.word_count() <= complete.len() {
        return None;
    }
    let prefix_ok = cmd
        .words()
        .zip(complete)
        .all(|(name_word, input)| starts_with_nocase(name_word, input));
    if !prefix_ok {
        return None;
    }
    let next = cmd.word(complete.len())?;
    match partial {
        Some(p) if !starts_with_nocase(next, p) => None,
        _ => Some(next),
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
