// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for bdguard-core operations.

use thiserror::Error;

/// All possible errors that can occur in bdguard-core operations.
///
/// The engine never surfaces these to the hook caller: a failed tracker
/// lookup is treated as an unknown fact, a failed mutation as a skipped one.
#[derive(Debug, Error)]
pub enum Error {
    #[error("issue not found: {0}")]
    IssueNotFound(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: open, in_progress, blocked, pending_approval, closed")]
    InvalidStatus(String),

    #[error("invalid issue type: '{0}'\n  hint: valid types are: epic, ticket, ac, research")]
    InvalidIssueType(String),

    #[error("tracker command `{command}` failed: {reason}")]
    Tracker { command: String, reason: String },

    #[error("tracker command `{command}` timed out after {secs}s")]
    Timeout { command: String, secs: u64 },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for bdguard-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
