// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The hook entry point: one envelope in, one exit code out.

use std::path::PathBuf;

use bdguard_core::evaluate;

use super::{Overrides, Project};
use crate::payload::HookPayload;
use crate::report::Report;

/// Evaluates the raw stdin envelope. Input that cannot be read as a shell
/// tool call is allowed silently.
pub fn run(input: &str, overrides: &Overrides) -> Report {
    let payload = match HookPayload::parse(input) {
        Ok(payload) => payload,
        Err(_) => return Report::allow(),
    };
    let Some(command) = payload.command() else {
        return Report::allow();
    };

    let cwd = payload
        .cwd
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let project = Project::open(&cwd, overrides);

    let phase = payload.phase();
    let outcome = evaluate(command, phase, &project.tracker());
    let report = Report::from(&outcome);
    if report.is_blocked() {
        tracing::info!(?phase, "blocked: {}", command);
    }
    report
}

#[cfg(test)]
#[path = "hook_tests.rs"]
mod tests;
