// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Helpers shared by the binary specs.

use std::path::PathBuf;
use std::process::{Command, Output};

use assert_cmd::cargo::CommandCargoExt;

/// Path to the example schema shipped under `demos/`.
pub fn schema_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos")
}

/// The built binary, pointed at the example schema.
pub fn nosh() -> Nosh {
    let mut cmd = Command::cargo_bin("nosh").expect("binary built");
    cmd.arg("-x").arg(schema_dir());
    cmd.env("HOSTNAME", "r1");
    Nosh { cmd }
}

/// The built binary with no implicit arguments.
pub fn nosh_bare() -> Nosh {
    let cmd = Command::cargo_bin("nosh").expect("binary built");
    Nosh { cmd }
}

pub struct Nosh {
    pub cmd: Command,
}

impl Nosh {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// One `-c` command.
    pub fn command(mut self, line: &str) -> Self {
        self.cmd.arg("-c").arg(line);
        self
    }

    pub fn run(mut self) -> Run {
        // Interactive fallback would block on stdin.
        self.cmd.stdin(std::process::Stdio::null());
        Run {
            output: self.cmd.output().expect("spawn nosh"),
        }
    }
}

pub struct Run {
    output: Output,
}

impl Run {
    pub fn passes(self) -> Self {
        assert!(
            self.output.status.success(),
            "expected success, got {:?}\nstderr: {}",
            self.output.status.code(),
            self.stderr()
        );
        self
    }

    pub fn fails_with(self, code: i32) -> Self {
        assert_eq!(
            self.output.status.code(),
            Some(code),
            "stderr: {}",
            self.stderr()
        );
        self
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(
            self.stdout().contains(needle),
            "stdout missing {needle:?}:\n{}",
            self.stdout()
        );
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(
            !self.stdout().contains(needle),
            "stdout unexpectedly has {needle:?}:\n{}",
            self.stdout()
        );
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(
            self.stderr().contains(needle),
            "stderr missing {needle:?}:\n{}",
            self.stderr()
        );
        self
    }
}
