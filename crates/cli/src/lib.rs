// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bdguard - a tool-call hook that guards `bd` commands.
//!
//! The binary reads one tool-call envelope from stdin, runs the rules and
//! propagation from [`bdguard_core`] against the live tracker, and answers
//! with an exit code:
//!
//! - `0`: allow. Any propagation notices are written to stderr.
//! - `2`: block. The reason is written to stderr.
//!
//! # Main Components
//!
//! - [`BdTracker`] - the tracker reached through `bd` subprocesses
//! - [`Config`] - `.beads/guard.toml` settings
//! - [`HookPayload`] - the stdin envelope

mod bd;
mod cli;
mod commands;
pub mod config;
pub mod env;
pub mod error;
mod logging;
pub mod payload;
pub mod report;

pub use bd::BdTracker;
pub use cli::{Cli, Command};
pub use commands::Overrides;
pub use config::{find_project_root, Config};
pub use error::{Error, Result};
pub use payload::HookPayload;
pub use report::Report;

use std::io::Read;

/// Executes a parsed command line and returns the process exit code.
pub fn run(cli: Cli) -> Result<i32> {
    let overrides = Overrides {
        bd: cli.bd,
        timeout_secs: cli.timeout,
    };

    match cli.command.unwrap_or(Command::Hook) {
        Command::Hook => {
            let report = commands::hook::run(&read_stdin(), &overrides);
            if !report.message.is_empty() {
                eprintln!("{}", report.message);
            }
            Ok(report.code)
        }
        Command::Check { directory, command } => {
            let report = commands::check::run(directory, &command, &overrides)?;
            println!("{}", report.message);
            Ok(report.code)
        }
    }
}

/// Unreadable stdin counts as empty input.
fn read_stdin() -> String {
    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        input.clear();
    }
    input
}
