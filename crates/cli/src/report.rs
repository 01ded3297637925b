// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Turns an engine outcome into the hook's exit code and stderr text.

use bdguard_core::{Outcome, Verdict};

/// The command may run.
pub const EXIT_ALLOW: i32 = 0;
/// The command is refused; stderr explains why.
pub const EXIT_BLOCK: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub code: i32,
    /// Written to stderr as-is. Empty for a silent allow.
    pub message: String,
}

impl Report {
    pub fn allow() -> Self {
        Report {
            code: EXIT_ALLOW,
            message: String::new(),
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.code == EXIT_BLOCK
    }
}

impl From<&Outcome> for Report {
    fn from(outcome: &Outcome) -> Self {
        match &outcome.verdict {
            Verdict::Block(block) => Report {
                code: EXIT_BLOCK,
                message: block.to_string(),
            },
            Verdict::Allow => Report {
                code: EXIT_ALLOW,
                message: outcome
                    .notices
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"),
            },
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
