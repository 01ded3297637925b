// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Status propagation across the parent/child hierarchy.
//!
//! Each walk returns the ids it actually changed. A mutation that fails is
//! skipped rather than aborting the walk, so a failure only shows up as a
//! missing id. Walks are capped at [`MAX_WALK`] steps and stop on a repeated
//! id, since parent links edited outside the guard may form a cycle.

use std::collections::HashSet;

use crate::issue::{Issue, Status};
use crate::tracker::Tracker;

/// Upper bound on hierarchy steps taken by any walk.
pub const MAX_WALK: usize = 64;

/// Iterator over the ancestors of an issue, nearest first.
struct Ancestors<'a, T: Tracker + ?Sized> {
    tracker: &'a T,
    current: Option<String>,
    seen: HashSet<String>,
}

impl<'a, T: Tracker + ?Sized> Ancestors<'a, T> {
    fn new(tracker: &'a T, id: &str) -> Self {
        Ancestors {
            tracker,
            current: Some(id.to_string()),
            seen: HashSet::from([id.to_string()]),
        }
    }
}

impl<T: Tracker + ?Sized> Iterator for Ancestors<'_, T> {
    type Item = Issue;

    fn next(&mut self) -> Option<Issue> {
        let current = self.current.take()?;
        if self.seen.len() > MAX_WALK {
            tracing::warn!("ancestor walk from {} exceeded {} steps", current, MAX_WALK);
            return None;
        }
        let parent = self.tracker.parent_of(&current)?;
        if !self.seen.insert(parent.id.clone()) {
            tracing::warn!("parent cycle detected at {}", parent.id);
            return None;
        }
        self.current = Some(parent.id.clone());
        Some(parent)
    }
}

/// Marks open ancestors `in_progress`.
///
/// Stops at the first blocked or closed ancestor. Ancestors already in
/// progress are passed over so a higher open one is still reached.
pub fn in_progress_up<T: Tracker + ?Sized>(tracker: &T, id: &str) -> Vec<String> {
    let mut updated = Vec::new();
    for ancestor in Ancestors::new(tracker, id) {
        match ancestor.status {
            Status::Blocked | Status::Closed => break,
            Status::Open => {
                if set(tracker, &ancestor.id, Status::InProgress) {
                    updated.push(ancestor.id);
                }
            }
            Status::InProgress | Status::PendingApproval => {}
        }
    }
    updated
}

/// Marks every ancestor up to the root `blocked`.
pub fn blocked_up<T: Tracker + ?Sized>(tracker: &T, id: &str) -> Vec<String> {
    let mut updated = Vec::new();
    for ancestor in Ancestors::new(tracker, id) {
        if !ancestor.is_blocked() && set(tracker, &ancestor.id, Status::Blocked) {
            updated.push(ancestor.id);
        }
    }
    updated
}

/// Reopens blocked ancestors once nothing beneath them is still blocked.
///
/// At each level the siblings of the current issue are checked first; any
/// blocked sibling keeps the parent blocked and ends the walk, as does a
/// sibling list the tracker fails to return.
pub fn unblock_up<T: Tracker + ?Sized>(tracker: &T, id: &str) -> Vec<String> {
    let mut updated = Vec::new();
    let mut current = id.to_string();
    let mut seen = HashSet::from([current.clone()]);

    while seen.len() <= MAX_WALK {
        let Some(parent) = tracker.parent_of(&current) else {
            break;
        };
        if any_sibling_blocked(tracker, &parent.id, &current) {
            tracing::debug!("{} stays blocked: a sibling of {} is blocked", parent.id, current);
            break;
        }
        if !parent.is_blocked() || !set(tracker, &parent.id, Status::Open) {
            break;
        }
        updated.push(parent.id.clone());
        if !seen.insert(parent.id.clone()) {
            tracing::warn!("parent cycle detected at {}", parent.id);
            break;
        }
        current = parent.id;
    }
    updated
}

/// Closes every non-closed descendant of `id` with `reason`, each subtree
/// before its root.
pub fn cascade_close<T: Tracker + ?Sized>(tracker: &T, id: &str, reason: &str) -> Vec<String> {
    let mut closed = Vec::new();
    let mut seen = HashSet::from([id.to_string()]);
    cascade_close_into(tracker, id, reason, 0, &mut seen, &mut closed);
    closed
}

fn cascade_close_into<T: Tracker + ?Sized>(
    tracker: &T,
    id: &str,
    reason: &str,
    depth: usize,
    seen: &mut HashSet<String>,
    closed: &mut Vec<String>,
) {
    if depth >= MAX_WALK {
        tracing::warn!("cascade below {} exceeded {} levels", id, MAX_WALK);
        return;
    }
    for child in tracker.known_children(id) {
        if !seen.insert(child.id.clone()) {
            continue;
        }
        cascade_close_into(tracker, &child.id, reason, depth + 1, seen, closed);
        if child.is_closed() {
            continue;
        }
        match tracker.close(&child.id, reason) {
            Ok(()) => closed.push(child.id),
            Err(e) => tracing::warn!("failed to close {}: {}", child.id, e),
        }
    }
}

/// Every descendant of `id` that is not closed, parents before children.
pub fn open_descendants<T: Tracker + ?Sized>(tracker: &T, id: &str) -> Vec<Issue> {
    let mut open = Vec::new();
    let mut seen = HashSet::from([id.to_string()]);
    collect_open(tracker, id, 0, &mut seen, &mut open);
    open
}

fn collect_open<T: Tracker + ?Sized>(
    tracker: &T,
    id: &str,
    depth: usize,
    seen: &mut HashSet<String>,
    open: &mut Vec<Issue>,
) {
    if depth >= MAX_WALK {
        return;
    }
    for child in tracker.known_children(id) {
        if !seen.insert(child.id.clone()) {
            continue;
        }
        let child_id = child.id.clone();
        if !child.is_closed() {
            open.push(child);
        }
        collect_open(tracker, &child_id, depth + 1, seen, open);
    }
}

/// Blocks `id` after a `blocks` edge was created against it.
///
/// Blocked and closed issues are left alone, as are issues whose status
/// cannot be read.
pub fn auto_block<T: Tracker + ?Sized>(tracker: &T, id: &str) -> Vec<String> {
    match tracker.lookup(id) {
        Some(issue) if !issue.is_blocked() && !issue.is_closed() => {
            if set(tracker, id, Status::Blocked) {
                vec![issue.id]
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    }
}

/// Purges tombstones after a hard delete. Failure is logged and otherwise
/// ignored: the delete already happened.
pub fn compact<T: Tracker + ?Sized>(tracker: &T) -> bool {
    match tracker.purge_tombstones() {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("tombstone purge failed: {}", e);
            false
        }
    }
}

/// A sibling list that cannot be read counts as blocked.
fn any_sibling_blocked<T: Tracker + ?Sized>(tracker: &T, parent: &str, id: &str) -> bool {
    match tracker.children_of(parent) {
        Ok(siblings) => siblings.iter().any(|s| s.id != id && s.is_blocked()),
        Err(e) => {
            tracing::debug!("listing children of {} failed: {}", parent, e);
            true
        }
    }
}

fn set<T: Tracker + ?Sized>(tracker: &T, id: &str, status: Status) -> bool {
    match tracker.set_status(id, status) {
        Ok(()) => {
            tracing::debug!("set {} to {}", id, status);
            true
        }
        Err(e) => {
            tracing::warn!("failed to set {} to {}: {}", id, status, e);
            false
        }
    }
}

#[cfg(test)]
#[path = "propagate_tests.rs"]
mod tests;
