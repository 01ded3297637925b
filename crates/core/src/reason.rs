// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Close reason classification.
//!
//! A close reason is either a completion ("Done"), a non-completion with an
//! explanation ("Duplicate - of T-9"), or invalid. Completions refuse to close
//! over open descendants; non-completions cascade to the whole subtree.

/// Reasons that mark work as finished. Matched exactly, case-insensitive.
pub const COMPLETION_REASONS: &[&str] = &[
    "done",
    "fixed",
    "all acs complete",
    "all tickets complete",
];

/// Prefixes that mark work as abandoned. Must be followed by an explanation.
pub const NON_COMPLETION_PREFIXES: &[&str] =
    &["won't implement", "wont implement", "duplicate", "out of scope"];

/// Usage hint listing the canonical reasons.
pub const CANONICAL_REASONS_HINT: &str =
    "Completion: Done, Fixed, All ACs complete, All tickets complete\n\
     Non-completion: Won't implement - [why], Duplicate - [of what], Out of scope - [why]";

/// Classification of a close reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Work finished.
    Completion,
    /// Work abandoned, with an explanation.
    NonCompletion,
    /// A non-completion prefix with nothing after it. Carries the prefix.
    MissingExplanation(&'static str),
    /// Anything else.
    Invalid,
}

impl CloseReason {
    /// Classifies free text given to `close --reason`.
    pub fn classify(reason: &str) -> Self {
        let lower = reason.trim().to_lowercase();
        if lower.is_empty() {
            return CloseReason::Invalid;
        }

        if COMPLETION_REASONS.contains(&lower.as_str()) {
            return CloseReason::Completion;
        }

        for prefix in NON_COMPLETION_PREFIXES {
            if let Some(rest) = lower.strip_prefix(prefix) {
                let explanation = rest.trim_matches(|c: char| c == ' ' || c == '-' || c == ':');
                return if explanation.is_empty() {
                    CloseReason::MissingExplanation(*prefix)
                } else {
                    CloseReason::NonCompletion
                };
            }
        }

        CloseReason::Invalid
    }

    /// Returns true for reasons the guard lets through.
    pub fn is_valid(&self) -> bool {
        matches!(self, CloseReason::Completion | CloseReason::NonCompletion)
    }
}

#[cfg(test)]
#[path = "reason_tests.rs"]
mod tests;
