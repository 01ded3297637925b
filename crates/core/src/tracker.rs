// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The query/mutation surface of the external issue tracker.
//!
//! The guard and propagation engine see the tracker only through [`Tracker`].
//! Every call may fail; callers decide what an unknown fact means.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::issue::{Issue, Status};

/// Read and write access to the tracker.
///
/// Mutations must be idempotent: setting a status to its current value is a
/// successful no-op.
pub trait Tracker {
    /// Looks up a single issue.
    fn get(&self, id: &str) -> Result<Issue>;

    /// Direct children of `id`. Order only affects diagnostics.
    fn children_of(&self, id: &str) -> Result<Vec<Issue>>;

    /// Whether any `blocks` edge points at `id`.
    fn has_blocking_dependency(&self, id: &str) -> Result<bool>;

    fn set_status(&self, id: &str, status: Status) -> Result<()>;

    fn close(&self, id: &str, reason: &str) -> Result<()>;

    /// Purges tombstones left by hard deletes.
    fn purge_tombstones(&self) -> Result<()>;

    /// [`Tracker::get`], with any failure read as "no such issue".
    fn lookup(&self, id: &str) -> Option<Issue> {
        match self.get(id) {
            Ok(issue) => Some(issue),
            Err(e) => {
                tracing::debug!("lookup of {} failed: {}", id, e);
                None
            }
        }
    }

    /// [`Tracker::children_of`], with any failure read as "no children".
    fn known_children(&self, id: &str) -> Vec<Issue> {
        self.children_of(id).unwrap_or_else(|e| {
            tracing::debug!("listing children of {} failed: {}", id, e);
            Vec::new()
        })
    }

    /// [`Tracker::has_blocking_dependency`], with any failure read as "no
    /// blocker".
    fn known_blocked(&self, id: &str) -> bool {
        self.has_blocking_dependency(id).unwrap_or_else(|e| {
            tracing::debug!("dependency lookup of {} failed: {}", id, e);
            false
        })
    }

    /// Parent of `id`, if both the issue and its parent can be read.
    fn parent_of(&self, id: &str) -> Option<Issue> {
        let parent_id = self.lookup(id)?.parent?;
        self.lookup(&parent_id)
    }
}

/// A mutation applied to a [`MemoryTracker`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    SetStatus { id: String, status: Status },
    Close { id: String, reason: String },
    PurgeTombstones,
}

#[derive(Debug, Default)]
struct MemoryState {
    issues: BTreeMap<String, Issue>,
    close_reasons: BTreeMap<String, String>,
    /// `(from, to)`: `from` blocks `to`.
    blockers: Vec<(String, String)>,
    log: Vec<Mutation>,
    /// Ids whose mutations fail, to exercise partial failure.
    failing: Vec<String>,
    /// Ids whose children cannot be listed.
    unlistable: Vec<String>,
    offline: bool,
}

/// In-process tracker holding issues in memory.
///
/// Children are listed in id order.
#[derive(Debug, Default)]
pub struct MemoryTracker {
    state: RefCell<MemoryState>,
}

impl MemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tracker from a set of issues.
    pub fn with_issues(issues: impl IntoIterator<Item = Issue>) -> Self {
        let tracker = Self::new();
        for issue in issues {
            tracker.insert(issue);
        }
        tracker
    }

    /// Adds or replaces an issue.
    pub fn insert(&self, issue: Issue) {
        self.state
            .borrow_mut()
            .issues
            .insert(issue.id.clone(), issue);
    }

    /// Records that `from` blocks `to`, as a completed `bd dep` would.
    pub fn add_blocker(&self, from: &str, to: &str) {
        let mut state = self.state.borrow_mut();
        let edge = (from.to_string(), to.to_string());
        if !state.blockers.contains(&edge) {
            state.blockers.push(edge);
        }
    }

    /// Current status of `id`, if it exists.
    pub fn status(&self, id: &str) -> Option<Status> {
        self.state.borrow().issues.get(id).map(|i| i.status)
    }

    /// Reason `id` was last closed with.
    pub fn close_reason(&self, id: &str) -> Option<String> {
        self.state.borrow().close_reasons.get(id).cloned()
    }

    /// Every mutation applied so far.
    pub fn mutations(&self) -> Vec<Mutation> {
        self.state.borrow().log.clone()
    }

    /// Makes every mutation of `id` fail.
    pub fn fail_mutations_of(&self, id: &str) {
        self.state.borrow_mut().failing.push(id.to_string());
    }

    /// Makes listing the children of `id` fail.
    pub fn fail_children_of(&self, id: &str) {
        self.state.borrow_mut().unlistable.push(id.to_string());
    }

    /// Makes every call fail, as an unreachable tracker would.
    pub fn set_offline(&self, offline: bool) {
        self.state.borrow_mut().offline = offline;
    }

    fn check_online(&self, command: &str) -> Result<()> {
        if self.state.borrow().offline {
            return Err(Error::Tracker {
                command: command.to_string(),
                reason: "tracker offline".to_string(),
            });
        }
        Ok(())
    }

    fn check_mutable(&self, command: &str, id: &str) -> Result<()> {
        self.check_online(command)?;
        let state = self.state.borrow();
        if state.failing.iter().any(|f| f == id) {
            return Err(Error::Tracker {
                command: command.to_string(),
                reason: format!("{id} is read-only"),
            });
        }
        if !state.issues.contains_key(id) {
            return Err(Error::IssueNotFound(id.to_string()));
        }
        Ok(())
    }
}

impl Tracker for MemoryTracker {
    fn get(&self, id: &str) -> Result<Issue> {
        self.check_online("show")?;
        self.state
            .borrow()
            .issues
            .get(id)
            .cloned()
            .ok_or_else(|| Error::IssueNotFound(id.to_string()))
    }

    fn children_of(&self, id: &str) -> Result<Vec<Issue>> {
        self.check_online("list")?;
        let state = self.state.borrow();
        if state.unlistable.iter().any(|u| u == id) {
            return Err(Error::Tracker {
                command: "list".to_string(),
                reason: format!("children of {id} unavailable"),
            });
        }
        Ok(state
            .issues
            .values()
            .filter(|i| i.parent.as_deref() == Some(id))
            .cloned()
            .collect())
    }

    fn has_blocking_dependency(&self, id: &str) -> Result<bool> {
        self.check_online("dep list")?;
        Ok(self.state.borrow().blockers.iter().any(|(_, to)| to == id))
    }

    fn set_status(&self, id: &str, status: Status) -> Result<()> {
        self.check_mutable("update", id)?;
        let mut state = self.state.borrow_mut();
        if let Some(issue) = state.issues.get_mut(id) {
            issue.status = status;
        }
        state.log.push(Mutation::SetStatus {
            id: id.to_string(),
            status,
        });
        Ok(())
    }

    fn close(&self, id: &str, reason: &str) -> Result<()> {
        self.check_mutable("close", id)?;
        let mut state = self.state.borrow_mut();
        if let Some(issue) = state.issues.get_mut(id) {
            issue.status = Status::Closed;
        }
        state
            .close_reasons
            .insert(id.to_string(), reason.to_string());
        state.log.push(Mutation::Close {
            id: id.to_string(),
            reason: reason.to_string(),
        });
        Ok(())
    }

    fn purge_tombstones(&self) -> Result<()> {
        self.check_online("admin compact")?;
        self.state.borrow_mut().log.push(Mutation::PurgeTombstones);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
