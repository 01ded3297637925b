// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `BDGUARD_LOG` if set and non-empty.
pub fn log_filter() -> Option<String> {
    std::env::var(vars::BDGUARD_LOG)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Returns the value of `BDGUARD_BD` if set and non-empty.
pub fn bd_binary() -> Option<PathBuf> {
    std::env::var(vars::BDGUARD_BD)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

/// Returns `BDGUARD_TIMEOUT_SECS` as seconds. Unparseable or zero values are
/// ignored.
pub fn timeout_secs() -> Option<u64> {
    std::env::var(vars::BDGUARD_TIMEOUT_SECS)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|secs| *secs > 0)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
