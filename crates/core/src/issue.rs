// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core issue types: Issue, IssueType, and Status.
//!
//! The hierarchy is Epic → Ticket → AC. Research items sit outside it. The
//! parent link is a plain id; children are never stored and are always
//! computed by asking the tracker.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Label prefix carrying the issue kind (e.g. `type:ticket`).
pub const TYPE_LABEL_PREFIX: &str = "type:";

/// Classification of issues, derived from the `type:<kind>` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// Top of the hierarchy. Never needs a parent.
    Epic,
    /// Unit of work, optionally parented to an epic.
    Ticket,
    /// Acceptance criterion. Always parented to a ticket.
    Ac,
    /// Investigation outside the hierarchy.
    Research,
}

impl IssueType {
    /// Every kind, in the order type labels are searched.
    pub const ALL: [IssueType; 4] = [
        IssueType::Epic,
        IssueType::Ticket,
        IssueType::Ac,
        IssueType::Research,
    ];

    /// Returns the string representation used in labels and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Epic => "epic",
            IssueType::Ticket => "ticket",
            IssueType::Ac => "ac",
            IssueType::Research => "research",
        }
    }

    /// Human-facing name used in block messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            IssueType::Epic => "Epic",
            IssueType::Ticket => "Ticket",
            IssueType::Ac => "AC",
            IssueType::Research => "Research",
        }
    }

    /// The label that marks an issue of this kind.
    pub fn label(&self) -> String {
        format!("{}{}", TYPE_LABEL_PREFIX, self.as_str())
    }

    /// Whether an issue of this kind must be created with `--parent`.
    pub fn requires_parent(&self) -> bool {
        matches!(self, IssueType::Ac)
    }

    /// Parent kinds this kind may never sit under.
    pub fn forbidden_parents(&self) -> &'static [IssueType] {
        match self {
            IssueType::Ticket => &[IssueType::Ac, IssueType::Ticket],
            IssueType::Ac => &[IssueType::Epic, IssueType::Ac],
            IssueType::Epic | IssueType::Research => &[],
        }
    }

    /// Parses a single label such as `type:ac`. Returns `None` for labels
    /// that are not type labels or name an unknown kind.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        let prefix = label.get(..TYPE_LABEL_PREFIX.len())?;
        if !prefix.eq_ignore_ascii_case(TYPE_LABEL_PREFIX) {
            return None;
        }
        label[TYPE_LABEL_PREFIX.len()..].parse().ok()
    }

    /// The kind named by the first type label in `labels`, if any.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Option<Self> {
        labels.iter().find_map(|l| Self::from_label(l.as_ref()))
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "epic" => Ok(IssueType::Epic),
            "ticket" => Ok(IssueType::Ticket),
            "ac" => Ok(IssueType::Ac),
            "research" => Ok(IssueType::Research),
            _ => Err(Error::InvalidIssueType(s.to_string())),
        }
    }
}

/// Workflow status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not yet started.
    Open,
    /// Currently being worked on.
    InProgress,
    /// Waiting on a blocking dependency.
    Blocked,
    /// Finished, waiting for a human to sign off.
    PendingApproval,
    /// Terminal. Reopening is a plain status update.
    Closed,
}

impl Status {
    /// Statuses that `update --status` may set. Closing goes through
    /// `close`, which carries a reason.
    pub const UPDATABLE: [Status; 4] = [
        Status::Open,
        Status::InProgress,
        Status::Blocked,
        Status::PendingApproval,
    ];

    /// Returns the string representation used by the tracker.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::Blocked => "blocked",
            Status::PendingApproval => "pending_approval",
            Status::Closed => "closed",
        }
    }

    /// Returns true if `update --status` may set this status.
    pub fn is_updatable(&self) -> bool {
        Self::UPDATABLE.contains(self)
    }

    /// Returns true for the statuses an unblock moves to.
    pub fn is_active(&self) -> bool {
        matches!(self, Status::Open | Status::InProgress)
    }

    /// Comma-separated list of updatable statuses, for messages.
    pub fn updatable_list() -> String {
        Self::UPDATABLE
            .iter()
            .map(Status::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Status::Open),
            "in_progress" => Ok(Status::InProgress),
            "blocked" => Ok(Status::Blocked),
            "pending_approval" => Ok(Status::PendingApproval),
            "closed" => Ok(Status::Closed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// A tracked work item as seen through the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Opaque tracker id.
    pub id: String,
    /// Current workflow state.
    pub status: Status,
    /// Kind from the `type:` label, if the issue carries one.
    pub issue_type: Option<IssueType>,
    /// Id of the parent issue. Weak: the tracker owns the link.
    pub parent: Option<String>,
}

impl Issue {
    /// Creates an unparented, untyped issue.
    pub fn new(id: impl Into<String>, status: Status) -> Self {
        Issue {
            id: id.into(),
            status,
            issue_type: None,
            parent: None,
        }
    }

    /// Sets the kind.
    #[must_use]
    pub fn with_type(mut self, issue_type: IssueType) -> Self {
        self.issue_type = Some(issue_type);
        self
    }

    /// Sets the parent id.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn is_closed(&self) -> bool {
        self.status == Status::Closed
    }

    pub fn is_blocked(&self) -> bool {
        self.status == Status::Blocked
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
