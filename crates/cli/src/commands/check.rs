// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dry-run of the guard rules for a single command line.

use std::path::PathBuf;

use bdguard_core::{guard, BdCommand, Verdict};

use super::{Overrides, Project};
use crate::error::{Error, Result};
use crate::report::{Report, EXIT_ALLOW, EXIT_BLOCK};

/// Checks `words` against the guard only. Nothing is propagated.
pub fn run(directory: Option<PathBuf>, words: &[String], overrides: &Overrides) -> Result<Report> {
    let line = command_line(words);
    let command = BdCommand::parse(&line)
        .ok_or_else(|| Error::Input(format!("not a bd command: {}", line)))?;

    let cwd = match directory {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let project = Project::open(&cwd, overrides);

    let report = match guard::check(&command, &project.tracker()) {
        Verdict::Allow => Report {
            code: EXIT_ALLOW,
            message: format!("ALLOWED: {}", line),
        },
        Verdict::Block(block) => Report {
            code: EXIT_BLOCK,
            message: block.to_string(),
        },
    };
    Ok(report)
}

/// Rebuilds a shell line from argv. A single argument is taken as the whole
/// line; otherwise words the tokenizer would split or unescape are re-quoted.
fn command_line(words: &[String]) -> String {
    if let [line] = words {
        return line.clone();
    }
    words
        .iter()
        .map(|w| quote(w))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote(word: &str) -> String {
    let special = |c: char| c.is_whitespace() || matches!(c, '"' | '\'' | '\\');
    if !word.is_empty() && !word.chars().any(special) {
        return word.to_string();
    }
    if !word.contains('\'') && (word.contains('"') || word.contains('\\')) {
        return format!("'{}'", word);
    }
    let mut quoted = String::with_capacity(word.len() + 2);
    quoted.push('"');
    for c in word.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
