// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bdguard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Guard rails and status propagation for bd issue hierarchies")]
#[command(
    long_about = "Guard rails and status propagation for bd issue hierarchies.\n\n\
    Run as an agent tool hook: the tool-call envelope arrives on stdin, exit 0 \
    allows the command and exit 2 blocks it with the reason on stderr."
)]
pub struct Cli {
    /// Tracker binary to run (overrides guard.toml and BDGUARD_BD)
    #[arg(long, global = true, value_name = "path")]
    pub bd: Option<PathBuf>,

    /// Seconds before a tracker call is killed
    #[arg(
        long,
        global = true,
        value_name = "secs",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: Option<u64>,

    /// Defaults to `hook` when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Evaluate one tool-call envelope read from stdin
    Hook,

    /// Check a bd command line against the guard rules without running it
    #[command(after_help = "\
Examples:
  bdguard check bd close T1 --reason Done
  bdguard check \"bd update T1 --status blocked\"
  bdguard check -C ../other bd delete E1 --hard --force")]
    Check {
        /// Locate the project from <path> instead of the current directory
        #[arg(short = 'C', long = "directory", value_name = "path")]
        directory: Option<PathBuf>,

        /// The command line, as separate words or one quoted string
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        command: Vec<String>,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
