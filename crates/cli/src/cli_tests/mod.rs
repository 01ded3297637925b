// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use clap::CommandFactory;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("bdguard").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_no_subcommand_means_hook() {
    let cli = parse(&[]);
    assert_eq!(cli.command, None);
    assert_eq!(cli.bd, None);
    assert_eq!(cli.timeout, None);
}

#[test]
fn test_hook_with_global_overrides() {
    let cli = parse(&["hook", "--bd", "/opt/bd", "--timeout", "3"]);
    assert_eq!(cli.command, Some(Command::Hook));
    assert_eq!(cli.bd, Some(PathBuf::from("/opt/bd")));
    assert_eq!(cli.timeout, Some(3));
}

#[test]
fn test_zero_timeout_is_rejected() {
    assert!(Cli::try_parse_from(["bdguard", "--timeout", "0", "hook"]).is_err());
}

#[test]
fn test_check_collects_trailing_words() {
    let cli = parse(&["check", "bd", "close", "T1", "--reason", "Done"]);
    assert_eq!(
        cli.command,
        Some(Command::Check {
            directory: None,
            command: ["bd", "close", "T1", "--reason", "Done"]
                .map(String::from)
                .to_vec(),
        })
    );
}

#[test]
fn test_check_with_directory() {
    let cli = parse(&["check", "-C", "/work", "bd ready"]);
    assert_eq!(
        cli.command,
        Some(Command::Check {
            directory: Some(PathBuf::from("/work")),
            command: vec!["bd ready".to_string()],
        })
    );
}

#[test]
fn test_check_requires_a_command() {
    assert!(Cli::try_parse_from(["bdguard", "check"]).is_err());
}
