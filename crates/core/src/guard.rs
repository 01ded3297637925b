// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pre-execution validation of `bd` commands.
//!
//! The guard only reads from the tracker. Each rule that fails produces a
//! [`Block`] naming the rule, the offending value, and a corrected command.

use std::fmt;

use crate::command::BdCommand;
use crate::issue::{IssueType, Status};
use crate::reason::{CloseReason, CANONICAL_REASONS_HINT};
use crate::tracker::Tracker;

const HIERARCHY_HINT: &str = "Hierarchy: Epic → Ticket → AC";

/// A rejected command: one headline plus corrective lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The violated rule, including the offending value.
    pub headline: String,
    /// How to fix it.
    pub details: Vec<String>,
}

impl Block {
    pub fn new(headline: impl Into<String>) -> Self {
        Block {
            headline: headline.into(),
            details: Vec::new(),
        }
    }

    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BLOCKED: {}", self.headline)?;
        for line in &self.details {
            write!(f, "\n{}", line)?;
        }
        Ok(())
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Block(Block),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow)
    }
}

impl From<Option<Block>> for Verdict {
    fn from(block: Option<Block>) -> Self {
        block.map_or(Verdict::Allow, Verdict::Block)
    }
}

/// Decides whether `command` may run against the tracker's current state.
pub fn check<T: Tracker + ?Sized>(command: &BdCommand, tracker: &T) -> Verdict {
    let block = match command {
        BdCommand::Ready => Some(
            Block::new("`bd ready` is not permitted")
                .line("Only humans choose what work to execute next.")
                .line("Ask which issue to pick up, then: bd show ISSUE_ID"),
        ),
        BdCommand::Delete {
            id,
            hard,
            force,
            cascade,
        } => check_delete(tracker, id.as_deref(), *hard, *force, *cascade),
        BdCommand::Update {
            id,
            status: Some(status),
            comment,
        } => check_update(tracker, id.as_deref(), status, comment.as_deref()),
        BdCommand::Close { reason, .. } => check_close(reason.as_deref()),
        BdCommand::Create {
            labels,
            type_flag,
            parent,
            ..
        } => check_create(tracker, labels, type_flag.as_deref(), parent.as_deref()),
        BdCommand::Update { status: None, .. }
        | BdCommand::Dep { .. }
        | BdCommand::Other { .. } => None,
    };

    if let Some(ref b) = block {
        tracing::info!(verb = command.verb(), "blocked: {}", b.headline);
    }
    block.into()
}

fn check_delete<T: Tracker + ?Sized>(
    tracker: &T,
    id: Option<&str>,
    hard: bool,
    force: bool,
    cascade: bool,
) -> Option<Block> {
    let shown_id = id.unwrap_or("$ISSUE_ID");
    let missing: Vec<&str> = [("--hard", hard), ("--force", force)]
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(flag, _)| flag)
        .collect();
    if !missing.is_empty() {
        return Some(
            Block::new(format!("`bd delete` requires {}", missing.join(" and ")))
                .line(format!("Usage: bd delete {} --hard --force", shown_id)),
        );
    }

    if cascade {
        return None;
    }
    let id = id?;
    let children = tracker.known_children(id);
    if children.is_empty() {
        return None;
    }
    Some(
        Block::new(format!("{} has {} children", id, children.len()))
            .line("Use --cascade to delete with all children:")
            .line(format!("  bd delete {} --hard --force --cascade", id)),
    )
}

fn check_update<T: Tracker + ?Sized>(
    tracker: &T,
    id: Option<&str>,
    requested: &str,
    comment: Option<&str>,
) -> Option<Block> {
    let shown_id = id.unwrap_or("ISSUE_ID");
    let status = match requested.parse::<Status>() {
        Ok(s) if s.is_updatable() => s,
        Ok(_) => {
            return Some(
                Block::new(format!("Invalid status \"{}\"", requested.to_lowercase()))
                    .line("Closing requires a reason; use close instead:")
                    .line(format!("  bd close {} --reason \"Done\"", shown_id)),
            );
        }
        Err(_) => {
            return Some(
                Block::new(format!("Invalid status \"{}\"", requested.to_lowercase()))
                    .line(format!("Valid statuses: {}", Status::updatable_list()))
                    .line(format!("Example: bd update {} --status in_progress", shown_id)),
            );
        }
    };

    let id = id?;
    match status {
        Status::Blocked => {
            if tracker.lookup(id).is_some_and(|i| i.is_closed()) {
                return Some(
                    Block::new(format!("Cannot block closed issue {}", id))
                        .line("Reopen the issue first if work needs to resume:")
                        .line(format!("  bd update {} --status open", id)),
                );
            }
            if !tracker.known_blocked(id) {
                return Some(
                    Block::new(format!(
                        "Setting {} to blocked requires a blocking dependency",
                        id
                    ))
                    .line(format!("First add the blocker: bd dep BLOCKER_ID --blocks {}", id))
                    .line(format!("Then: bd update {} --status blocked", id)),
                );
            }
        }
        Status::Open | Status::InProgress => {
            let explained = comment.is_some_and(|c| !c.trim().is_empty());
            if !explained && tracker.lookup(id).is_some_and(|i| i.is_blocked()) {
                return Some(
                    Block::new(format!("Unblocking {} requires an explanation", id))
                        .line("Add --comment \"how block was resolved\" to the command")
                        .line(format!(
                            "Example: bd update {} --status {} --comment \"T-123 completed\"",
                            id, status
                        )),
                );
            }
        }
        Status::PendingApproval | Status::Closed => {}
    }
    None
}

fn check_close(reason: Option<&str>) -> Option<Block> {
    let Some(reason) = reason else {
        return Some(
            Block::new("`bd close` requires --reason")
                .line("Usage: bd close ISSUE_ID --reason \"Done\"")
                .line(CANONICAL_REASONS_HINT),
        );
    };

    match CloseReason::classify(reason) {
        CloseReason::Completion | CloseReason::NonCompletion => None,
        CloseReason::MissingExplanation(prefix) => Some(
            Block::new(format!("Invalid close reason \"{}\"", reason)).line(format!(
                "Non-completion reason needs explanation: \"{} - [why]\"",
                capitalize(prefix)
            )),
        ),
        CloseReason::Invalid => Some(
            Block::new(format!("Invalid close reason \"{}\"", reason))
                .line("Use canonical close reason:")
                .line(CANONICAL_REASONS_HINT),
        ),
    }
}

fn check_create<T: Tracker + ?Sized>(
    tracker: &T,
    labels: &[String],
    type_flag: Option<&str>,
    parent: Option<&str>,
) -> Option<Block> {
    let mut kinds: Vec<IssueType> = Vec::new();
    for kind in labels.iter().filter_map(|l| IssueType::from_label(l)) {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    let kind = match kinds.as_slice() {
        [] => {
            return Some(
                Block::new("`bd create` requires a type label")
                    .line(format!(
                        "Use one of: {}",
                        IssueType::ALL
                            .iter()
                            .map(|k| format!("--label \"{}\"", k.label()))
                            .collect::<Vec<_>>()
                            .join(", ")
                    ))
                    .line("Example: bd create \"Title\" --label \"type:ticket\" --parent EPIC_ID"),
            );
        }
        [kind] => *kind,
        many => {
            return Some(
                Block::new(format!(
                    "`bd create` has conflicting type labels: {}",
                    many.iter().map(IssueType::label).collect::<Vec<_>>().join(", ")
                ))
                .line("An issue has exactly one type label.")
                .line("Example: bd create \"Title\" --label \"type:ticket\" --parent EPIC_ID"),
            );
        }
    };

    let epic_flag = type_flag.is_some_and(|t| t.trim().eq_ignore_ascii_case("epic"));
    if kind == IssueType::Epic && !epic_flag {
        let given = type_flag.map_or_else(
            || "did not set --type epic".to_string(),
            |t| format!("set --type {}", t),
        );
        return Some(
            Block::new("Epic creation misconfigured")
                .line(format!("You specified --label 'type:epic' but {}.", given))
                .line("Usage: bd create \"Title\" --label \"type:epic\" --type epic"),
        );
    }

    let Some(parent) = parent else {
        if kind.requires_parent() {
            return Some(
                Block::new(format!(
                    "{} ({}) must have a parent ticket",
                    kind.display_name(),
                    kind.label()
                ))
                .line(format!(
                    "Usage: bd create \"AC title\" --label \"{}\" --parent TICKET_ID",
                    kind.label()
                )),
            );
        }
        return None;
    };

    let parent_kind = tracker.lookup(parent).and_then(|p| p.issue_type)?;
    if !kind.forbidden_parents().contains(&parent_kind) {
        return None;
    }
    let rule = match kind {
        IssueType::Ac => "ACs must be children of tickets.",
        _ => "Tickets must be children of epics.",
    };
    Some(
        Block::new(format!(
            "{} cannot be child of {} ({})",
            kind.display_name(),
            parent_kind.as_str(),
            parent
        ))
        .line(rule)
        .line(HIERARCHY_HINT),
    )
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod tests;
