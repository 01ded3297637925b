// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::issue::IssueType;
use crate::tracker::{MemoryTracker, Mutation};

/// E1 → {T1 → {AC1, AC2}, T2 → {AC3}}, everything open.
fn tree() -> MemoryTracker {
    MemoryTracker::with_issues([
        Issue::new("E1", Status::Open).with_type(IssueType::Epic),
        Issue::new("T1", Status::Open)
            .with_type(IssueType::Ticket)
            .with_parent("E1"),
        Issue::new("T2", Status::Open)
            .with_type(IssueType::Ticket)
            .with_parent("E1"),
        Issue::new("AC1", Status::Open)
            .with_type(IssueType::Ac)
            .with_parent("T1"),
        Issue::new("AC2", Status::Open)
            .with_type(IssueType::Ac)
            .with_parent("T1"),
        Issue::new("AC3", Status::Open)
            .with_type(IssueType::Ac)
            .with_parent("T2"),
    ])
}

fn set_status(t: &MemoryTracker, id: &str, status: Status) {
    let mut issue = t.get(id).unwrap();
    issue.status = status;
    t.insert(issue);
}

#[test]
fn in_progress_climbs_open_ancestors() {
    let t = tree();
    assert_eq!(in_progress_up(&t, "AC1"), vec!["T1", "E1"]);
    assert_eq!(t.status("T1"), Some(Status::InProgress));
    assert_eq!(t.status("E1"), Some(Status::InProgress));
}

#[test]
fn in_progress_passes_over_in_progress_ancestor() {
    let t = tree();
    set_status(&t, "T1", Status::InProgress);
    assert_eq!(in_progress_up(&t, "AC1"), vec!["E1"]);
}

#[test]
fn in_progress_stops_at_blocked_ancestor() {
    let t = tree();
    set_status(&t, "T1", Status::Blocked);
    assert!(in_progress_up(&t, "AC1").is_empty());
    assert_eq!(t.status("E1"), Some(Status::Open));
}

#[test]
fn in_progress_stops_at_closed_ancestor() {
    let t = tree();
    set_status(&t, "T1", Status::Closed);
    assert!(in_progress_up(&t, "AC1").is_empty());
    assert_eq!(t.status("E1"), Some(Status::Open));
}

#[test]
fn in_progress_on_root_changes_nothing() {
    assert!(in_progress_up(&tree(), "E1").is_empty());
}

#[test]
fn blocked_reaches_every_ancestor() {
    let t = tree();
    set_status(&t, "T1", Status::Closed);
    assert_eq!(blocked_up(&t, "AC1"), vec!["T1", "E1"]);
    assert_eq!(t.status("T1"), Some(Status::Blocked));
    assert_eq!(t.status("E1"), Some(Status::Blocked));
}

#[test]
fn blocked_skips_already_blocked_without_stopping() {
    let t = tree();
    set_status(&t, "T1", Status::Blocked);
    assert_eq!(blocked_up(&t, "AC1"), vec!["E1"]);
}

#[test]
fn blocked_is_idempotent() {
    let t = tree();
    blocked_up(&t, "AC1");
    let first: Vec<_> = ["E1", "T1", "T2", "AC1"].map(|id| t.status(id)).to_vec();
    assert!(blocked_up(&t, "AC1").is_empty());
    let second: Vec<_> = ["E1", "T1", "T2", "AC1"].map(|id| t.status(id)).to_vec();
    assert_eq!(first, second);
}

#[test]
fn blocked_continues_past_failed_update() {
    let t = tree();
    t.fail_mutations_of("T1");
    assert_eq!(blocked_up(&t, "AC1"), vec!["E1"]);
    assert_eq!(t.status("T1"), Some(Status::Open));
}

#[test]
fn unblock_opens_parent_when_no_sibling_blocked() {
    let t = tree();
    set_status(&t, "AC1", Status::Blocked);
    set_status(&t, "T1", Status::Blocked);
    assert_eq!(unblock_up(&t, "AC1"), vec!["T1"]);
    assert_eq!(t.status("T1"), Some(Status::Open));
}

#[test]
fn unblock_leaves_parent_when_sibling_blocked() {
    let t = tree();
    set_status(&t, "AC1", Status::Blocked);
    set_status(&t, "AC2", Status::Blocked);
    set_status(&t, "T1", Status::Blocked);
    assert!(unblock_up(&t, "AC1").is_empty());
    assert_eq!(t.status("T1"), Some(Status::Blocked));
}

#[test]
fn unblock_climbs_through_blocked_chain() {
    let t = tree();
    for id in ["AC1", "T1", "E1"] {
        set_status(&t, id, Status::Blocked);
    }
    assert_eq!(unblock_up(&t, "AC1"), vec!["T1", "E1"]);
}

#[test]
fn unblock_stops_where_uncle_is_blocked() {
    let t = tree();
    for id in ["AC1", "T1", "E1", "T2"] {
        set_status(&t, id, Status::Blocked);
    }
    assert_eq!(unblock_up(&t, "AC1"), vec!["T1"]);
    assert_eq!(t.status("E1"), Some(Status::Blocked));
}

#[test]
fn unblock_keeps_parent_blocked_when_siblings_unlisted() {
    let t = tree();
    set_status(&t, "AC1", Status::Blocked);
    set_status(&t, "T1", Status::Blocked);
    t.fail_children_of("T1");
    assert!(unblock_up(&t, "AC1").is_empty());
    assert_eq!(t.status("T1"), Some(Status::Blocked));
}

#[test]
fn unblock_stops_where_uncles_are_unlisted() {
    let t = tree();
    for id in ["AC1", "T1", "E1"] {
        set_status(&t, id, Status::Blocked);
    }
    t.fail_children_of("E1");
    assert_eq!(unblock_up(&t, "AC1"), vec!["T1"]);
    assert_eq!(t.status("E1"), Some(Status::Blocked));
}

#[test]
fn unblock_stops_at_unblocked_parent() {
    let t = tree();
    set_status(&t, "AC1", Status::Blocked);
    set_status(&t, "E1", Status::Blocked);
    assert!(unblock_up(&t, "AC1").is_empty());
    assert_eq!(t.status("E1"), Some(Status::Blocked));
}

#[test]
fn cascade_closes_descendants_first() {
    let t = tree();
    let reason = "Duplicate - superseded by E9";
    assert_eq!(
        cascade_close(&t, "E1", reason),
        vec!["AC1", "AC2", "T1", "AC3", "T2"]
    );
    for id in ["T1", "T2", "AC1", "AC2", "AC3"] {
        assert_eq!(t.status(id), Some(Status::Closed));
        assert_eq!(t.close_reason(id).as_deref(), Some(reason));
    }
    assert_eq!(t.status("E1"), Some(Status::Open));
}

#[test]
fn cascade_skips_already_closed() {
    let t = tree();
    set_status(&t, "AC2", Status::Closed);
    assert_eq!(cascade_close(&t, "T1", "Out of scope - cut"), vec!["AC1"]);
    assert_eq!(t.close_reason("AC2"), None);
}

#[test]
fn cascade_descends_below_closed_child() {
    let t = tree();
    set_status(&t, "T1", Status::Closed);
    assert_eq!(
        cascade_close(&t, "E1", "Out of scope - cut"),
        vec!["AC1", "AC2", "AC3", "T2"]
    );
}

#[test]
fn open_descendants_lists_parents_first() {
    let t = tree();
    set_status(&t, "AC2", Status::Closed);
    let ids: Vec<_> = open_descendants(&t, "E1").into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["T1", "AC1", "T2", "AC3"]);
}

#[test]
fn open_descendants_of_leaf_is_empty() {
    assert!(open_descendants(&tree(), "AC1").is_empty());
}

#[test]
fn auto_block_blocks_open_issue() {
    let t = tree();
    assert_eq!(auto_block(&t, "T1"), vec!["T1"]);
    assert_eq!(t.status("T1"), Some(Status::Blocked));
}

#[test]
fn auto_block_leaves_blocked_and_closed_alone() {
    let t = tree();
    set_status(&t, "T1", Status::Blocked);
    set_status(&t, "T2", Status::Closed);
    assert!(auto_block(&t, "T1").is_empty());
    assert!(auto_block(&t, "T2").is_empty());
    assert!(auto_block(&t, "missing").is_empty());
    assert!(t.mutations().is_empty());
}

#[test]
fn compact_reports_failure_without_error() {
    let t = tree();
    assert!(compact(&t));
    assert_eq!(t.mutations(), vec![Mutation::PurgeTombstones]);
    t.set_offline(true);
    assert!(!compact(&t));
}

#[test]
fn walks_terminate_on_parent_cycle() {
    let t = MemoryTracker::with_issues([
        Issue::new("A", Status::Open).with_parent("B"),
        Issue::new("B", Status::Open).with_parent("A"),
    ]);
    assert_eq!(blocked_up(&t, "A"), vec!["B"]);
    assert!(blocked_up(&t, "A").is_empty());
    assert!(unblock_up(&t, "A").len() <= 2);
    assert!(cascade_close(&t, "A", "Out of scope - loop").len() <= 2);
}

#[test]
fn walks_on_offline_tracker_change_nothing() {
    let t = tree();
    t.set_offline(true);
    assert!(in_progress_up(&t, "AC1").is_empty());
    assert!(blocked_up(&t, "AC1").is_empty());
    assert!(unblock_up(&t, "AC1").is_empty());
    assert!(cascade_close(&t, "E1", "Out of scope - x").is_empty());
    assert!(open_descendants(&t, "E1").is_empty());
}
