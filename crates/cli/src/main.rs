// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nosh: a schema-driven command shell for network devices.

mod repl;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use nosh_core::Schema;
use nosh_shell::{Session, SessionOptions};

use crate::repl::Driver;

/// Failures that abort the run instead of returning to the prompt.
///
/// `main()` reports each once and exits with the matching code: 1 for
/// usage errors, 3 for system errors, and whatever line class tripped a
/// `--stop-on-error` halt (2 script, 3 system, 4 syntax).
#[derive(Debug, Error)]
pub enum Fatal {
    #[error("{0}")]
    Usage(String),

    #[error("{0}")]
    System(String),

    /// A failing line under `-e`, annotated with its origin.
    #[error("{message}")]
    Halted { code: i32, message: String },
}

impl Fatal {
    pub fn exit_code(&self) -> i32 {
        match self {
            Fatal::Usage(_) => 1,
            Fatal::System(_) => 3,
            Fatal::Halted { code, .. } => *code,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "nosh", version, about = "Schema-driven command shell")]
struct Cli {
    /// Run an interactive session (default when stdin is a terminal).
    #[arg(short = 'i', long)]
    interactive: bool,

    /// Execute one command and exit; may repeat.
    #[arg(short = 'c', long = "command", value_name = "CMD")]
    commands: Vec<String>,

    /// Execute commands from a file.
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    script: Option<PathBuf>,

    /// Directory of schema files to load.
    #[arg(short = 'x', long = "schema-dir", value_name = "DIR")]
    schema_dir: Option<PathBuf>,

    /// View to start in; defaults to the first declared view.
    #[arg(long, value_name = "NAME")]
    view: Option<String>,

    /// Never take the command lock.
    #[arg(long)]
    lockless: bool,

    /// Lock file taken around locking commands.
    #[arg(long, value_name = "PATH")]
    lock_file: Option<PathBuf>,

    /// Parse and dispatch without running non-permanent actions.
    #[arg(long)]
    dry_run: bool,

    /// Suppress action output.
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Stop at the first failing line.
    #[arg(short = 'e', long = "stop-on-error")]
    stop_on_error: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("NOSH_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(1);
        }
        Err(err) => {
            // --help / --version
            let _ = err.print();
            std::process::exit(0);
        }
    };

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("% Error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<i32, Fatal> {
    let schema_dir = cli
        .schema_dir
        .ok_or_else(|| Fatal::Usage("a schema directory is required (-x DIR)".into()))?;
    let catalog = Schema::load_dir(&schema_dir)
        .map_err(|err| Fatal::System(format!("schema load failed: {err}")))?;
    tracing::debug!(dir = %schema_dir.display(), "schema loaded");

    let start = match &cli.view {
        Some(name) => catalog
            .find_view(name)
            .ok_or_else(|| Fatal::Usage(format!("unknown start view '{name}'")))?,
        None => catalog
            .views()
            .map(|(id, _)| id)
            .next()
            .ok_or_else(|| Fatal::Usage("the schema declares no views".into()))?,
    };

    let options = SessionOptions {
        dry_run: cli.dry_run,
        lockless: cli.lockless,
        lock_path: cli.lock_file,
        use_alt_name: false,
    };
    let session = Session::new(&catalog, start, options);
    let mut driver = Driver::new(session, cli.quiet, cli.stop_on_error);

    let mut open = true;
    if !cli.commands.is_empty() {
        for (index, command) in cli.commands.iter().enumerate() {
            if !driver.run_line(command, Some(("command", index + 1)))? {
                open = false;
                break;
            }
        }
    } else if let Some(path) = &cli.script {
        let file = File::open(path)
            .map_err(|err| Fatal::System(format!("{}: {err}", path.display())))?;
        open = driver.batch(BufReader::new(file), &path.display().to_string())?;
    }

    let wants_prompt = cli.interactive || (cli.commands.is_empty() && cli.script.is_none());
    if open && wants_prompt {
        driver.interactive()?;
    }

    Ok(driver.exit_code())
}
