// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action dispatch: the pluggable handlers a matched command runs.
//!
//! Two shapes exist: simple handlers that compute their output directly,
//! and the script runner that spawns the expanded script and grabs its
//! stdout through a pipe, chunk by chunk, up to a fixed cap.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::Path;
use std::process::{Command as Process, Stdio};
use std::time::Duration;

use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};
use nix::sys::signal::{sigprocmask, SigSet, SigmaskHow, Signal};

/// Captured stdout is cut off at this many bytes.
const CAPTURE_CAP: usize = 1024 * 1024;
/// Pipe read chunk size.
const READ_CHUNK: usize = 8192;
/// Lock acquisition attempts, one second apart.
const LOCK_ATTEMPTS: u32 = 20;

/// What one action invocation sees.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// Resolved command name.
    pub command: String,
    /// Script text after variable expansion.
    pub script: String,
    pub dry_run: bool,
}

/// Exit code plus whatever stdout the handler grabbed.
#[derive(Debug, Clone, Default)]
pub struct ActionOutput {
    pub code: i32,
    pub out: Option<String>,
}

/// A pluggable command handler.
pub trait Action {
    fn run(&self, ctx: &ActionContext) -> std::io::Result<ActionOutput>;
}

/// Adapter for plain functions.
impl<F> Action for F
where
    F: Fn(&ActionContext) -> std::io::Result<ActionOutput>,
{
    fn run(&self, ctx: &ActionContext) -> std::io::Result<ActionOutput> {
        self(ctx)
    }
}

/// Runs the expanded script under `sh -c`, grabbing stdout.
#[derive(Debug, Default)]
pub struct ScriptAction;

impl Action for ScriptAction {
    fn run(&self, ctx: &ActionContext) -> std::io::Result<ActionOutput> {
        if ctx.script.trim().is_empty() {
            return Ok(ActionOutput::default());
        }
        let mut child = Process::new("sh")
            .arg("-c")
            .arg(&ctx.script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()?;

        let mut captured: Vec<u8> = Vec::new();
        if let Some(mut stdout) = child.stdout.take() {
            let mut chunk = [0u8; READ_CHUNK];
            loop {
                let n = stdout.read(&mut chunk)?;
                if n == 0 {
                    break;
                }
                // Keep draining past the cap so the child never blocks.
                let room = CAPTURE_CAP.saturating_sub(captured.len());
                captured.extend_from_slice(&chunk[..n.min(room)]);
            }
        }
        let status = child.wait()?;
        let code = status.code().unwrap_or(-1);
        tracing::debug!(command = %ctx.command, code, "script action finished");
        Ok(ActionOutput {
            code,
            out: Some(String::from_utf8_lossy(&captured).into_owned()),
        })
    }
}

/// Named handlers a schema's `builtin` attribute can address, with the
/// script runner as the fallback for script-only actions.
pub struct ActionRegistry {
    handlers: HashMap<String, Box<dyn Action>>,
    script: Box<dyn Action>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            script: Box::new(ScriptAction),
        }
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, action: Box<dyn Action>) {
        self.handlers.insert(name.into(), action);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Dispatch to a named builtin, or to the script runner.
    pub fn run(
        &self,
        builtin: Option<&str>,
        ctx: &ActionContext,
    ) -> std::io::Result<ActionOutput> {
        match builtin {
            Some(name) => match self.handlers.get(name) {
                Some(action) => action.run(ctx),
                None => Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no builtin action '{name}'"),
                )),
            },
            None => self.script.run(ctx),
        }
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// One optional hook callback.
pub struct Hook<F: ?Sized> {
    pub callback: Box<F>,
    /// Non-permanent hooks are suppressed under dry-run.
    pub permanent: bool,
}

/// Optional config and log hooks around command execution.
#[derive(Default)]
pub struct Hooks {
    /// Runs after a successful action.
    pub config: Option<Hook<dyn Fn() -> i32>>,
    /// Receives the canonical line and the action's return code.
    pub log: Option<Hook<dyn Fn(&str, i32) -> i32>>,
}

impl Hooks {
    pub fn run_config(&self, dry_run: bool) {
        if let Some(hook) = &self.config {
            if dry_run && !hook.permanent {
                return;
            }
            (hook.callback)();
        }
    }

    pub fn run_log(&self, dry_run: bool, line: &str, code: i32) {
        if let Some(hook) = &self.log {
            if dry_run && !hook.permanent {
                return;
            }
            (hook.callback)(line, code);
        }
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("config", &self.config.is_some())
            .field("log", &self.log.is_some())
            .finish()
    }
}

/// Acquire the whole-file advisory write lock, retrying once per second.
///
/// Returns the held lock; dropping it releases the file.
pub fn acquire_lock(path: &Path) -> std::io::Result<Flock<File>> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;
    for attempt in 0..LOCK_ATTEMPTS {
        match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
            Ok(lock) => return Ok(lock),
            Err((unlocked, errno)) => match errno {
                Errno::EAGAIN | Errno::EACCES => {
                    if attempt == 0 {
                        tracing::warn!(path = %path.display(), "waiting for lock");
                    }
                    file = unlocked;
                    std::thread::sleep(Duration::from_secs(1));
                }
                other => return Err(std::io::Error::from(other)),
            },
        }
    }
    Err(std::io::Error::new(
        std::io::ErrorKind::WouldBlock,
        format!("can't get lock on {}", path.display()),
    ))
}

/// Block interrupt signals for the duration of an action.
///
/// Returns the set to unblock afterwards.
pub fn block_interrupts() -> std::io::Result<SigSet> {
    let mut set = SigSet::empty();
    set.add(Signal::SIGINT);
    set.add(Signal::SIGQUIT);
    set.add(Signal::SIGHUP);
    sigprocmask(SigmaskHow::SIG_BLOCK, Some(&set), None)?;
    Ok(set)
}

pub fn unblock_interrupts(set: &SigSet) {
    let _ = sigprocmask(SigmaskHow::SIG_UNBLOCK, Some(set), None);
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
