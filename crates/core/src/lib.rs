// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bdguard-core: rules and propagation for a `bd` issue hierarchy.
//!
//! This crate parses `bd` command lines, decides whether they may run, and
//! keeps ancestor and descendant statuses consistent afterwards. The tracker
//! itself is reached only through the [`Tracker`] trait.

pub mod command;
pub mod engine;
pub mod error;
pub mod guard;
pub mod issue;
pub mod propagate;
pub mod reason;
pub mod tracker;

pub use command::BdCommand;
pub use engine::{evaluate, Notice, Outcome, Phase};
pub use error::{Error, Result};
pub use guard::{Block, Verdict};
pub use issue::{Issue, IssueType, Status};
pub use reason::CloseReason;
pub use tracker::{MemoryTracker, Mutation, Tracker};
