// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One pass of the guard and propagation engine over a command line.
//!
//! Before the command runs, the guard decides and, when it allows, status
//! changes are propagated through the hierarchy. After the command runs,
//! dependency creation and deletes trigger their follow-up actions.

use std::fmt;

use crate::command::BdCommand;
use crate::guard::{self, Block, Verdict};
use crate::issue::Status;
use crate::propagate;
use crate::reason::CloseReason;
use crate::tracker::Tracker;

/// Open descendant ids listed in a refused completion close.
const MAX_LISTED_DESCENDANTS: usize = 5;

/// When the engine runs relative to the command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Before execution: guard, then propagation.
    #[default]
    Pre,
    /// After execution: auto-block and compaction.
    Post,
}

/// An informational line about changes the engine made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub headline: String,
    pub marker: &'static str,
    pub ids: Vec<String>,
}

impl Notice {
    fn new(headline: impl Into<String>, marker: &'static str, ids: Vec<String>) -> Self {
        Notice {
            headline: headline.into(),
            marker,
            ids,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.headline)?;
        for id in &self.ids {
            write!(f, "\n  {} {}", self.marker, id)?;
        }
        Ok(())
    }
}

/// Result of one engine pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub verdict: Verdict,
    pub notices: Vec<Notice>,
}

impl Outcome {
    fn allow(notices: Vec<Notice>) -> Self {
        Outcome {
            verdict: Verdict::Allow,
            notices,
        }
    }

    fn block(block: Block, notices: Vec<Notice>) -> Self {
        Outcome {
            verdict: Verdict::Block(block),
            notices,
        }
    }
}

/// Evaluates a shell command line. Lines that do not invoke `bd` are allowed
/// untouched.
pub fn evaluate<T: Tracker + ?Sized>(command_line: &str, phase: Phase, tracker: &T) -> Outcome {
    let Some(command) = BdCommand::parse(command_line) else {
        return Outcome::allow(Vec::new());
    };
    tracing::debug!(verb = command.verb(), ?phase, "evaluating bd command");

    match phase {
        Phase::Pre => pre_execute(&command, tracker),
        Phase::Post => Outcome::allow(post_execute(&command, tracker)),
    }
}

fn pre_execute<T: Tracker + ?Sized>(command: &BdCommand, tracker: &T) -> Outcome {
    if let Verdict::Block(block) = guard::check(command, tracker) {
        return Outcome::block(block, Vec::new());
    }

    match command {
        BdCommand::Update {
            id: Some(id),
            status: Some(status),
            ..
        } => match status.parse::<Status>() {
            Ok(status) => Outcome::allow(propagate_update(tracker, id, status)),
            Err(_) => Outcome::allow(Vec::new()),
        },
        BdCommand::Close {
            id: Some(id),
            reason,
        } => propagate_close(tracker, id, reason.as_deref().unwrap_or_default()),
        _ => Outcome::allow(Vec::new()),
    }
}

fn propagate_update<T: Tracker + ?Sized>(tracker: &T, id: &str, status: Status) -> Vec<Notice> {
    let was_blocked = tracker.lookup(id).is_some_and(|i| i.is_blocked());
    let mut notices = Vec::new();

    if was_blocked && status.is_active() {
        let unblocked = propagate::unblock_up(tracker, id);
        if !unblocked.is_empty() {
            notices.push(Notice::new(
                format!("PROPAGATE: Unblocked {} ancestors", unblocked.len()),
                "↑",
                unblocked,
            ));
        }
    }

    let (updated, target) = match status {
        Status::InProgress => (propagate::in_progress_up(tracker, id), status),
        Status::Blocked => (propagate::blocked_up(tracker, id), status),
        _ => return notices,
    };
    if !updated.is_empty() {
        notices.push(Notice::new(
            format!("PROPAGATE: Set {} ancestors to {}", updated.len(), target),
            "↑",
            updated,
        ));
    }
    notices
}

fn propagate_close<T: Tracker + ?Sized>(tracker: &T, id: &str, reason: &str) -> Outcome {
    let open = propagate::open_descendants(tracker, id);
    if open.is_empty() {
        return Outcome::allow(Vec::new());
    }

    if CloseReason::classify(reason) == CloseReason::NonCompletion {
        let closed = propagate::cascade_close(tracker, id, reason);
        let notices = if closed.is_empty() {
            Vec::new()
        } else {
            vec![Notice::new(
                format!(
                    "CASCADE: Closed {} descendants with reason: {}",
                    closed.len(),
                    reason
                ),
                "✓",
                closed,
            )]
        };
        return Outcome::allow(notices);
    }

    let mut listed = open
        .iter()
        .take(MAX_LISTED_DESCENDANTS)
        .map(|i| i.id.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    if open.len() > MAX_LISTED_DESCENDANTS {
        listed.push_str(&format!(" (+{} more)", open.len() - MAX_LISTED_DESCENDANTS));
    }
    Outcome::block(
        Block::new(format!(
            "Cannot close {} - has {} open descendants",
            id,
            open.len()
        ))
        .line(format!("Open: {}", listed))
        .line("Close descendants first, or use non-completion reason:")
        .line(format!("  bd close {} --reason \"Out of scope - [why]\"", id)),
        Vec::new(),
    )
}

fn post_execute<T: Tracker + ?Sized>(command: &BdCommand, tracker: &T) -> Vec<Notice> {
    match command {
        BdCommand::Dep {
            blocks: Some(target),
            ..
        } => propagate::auto_block(tracker, target)
            .into_iter()
            .map(|id| {
                Notice::new(
                    format!("AUTO: Set {} to blocked (dependency created)", id),
                    "",
                    Vec::new(),
                )
            })
            .collect(),
        BdCommand::Delete { .. } if propagate::compact(tracker) => {
            vec![Notice::new("AUTO: Purged tombstones", "", Vec::new())]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
