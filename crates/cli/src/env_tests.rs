// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::path::PathBuf;

#[test]
fn test_vars_constants() {
    assert_eq!(vars::BDGUARD_LOG, "BDGUARD_LOG");
    assert_eq!(vars::BDGUARD_BD, "BDGUARD_BD");
    assert_eq!(vars::BDGUARD_TIMEOUT_SECS, "BDGUARD_TIMEOUT_SECS");
}

// Each variable is exercised by a single test so parallel tests never race
// on the same name.

#[test]
fn test_log_filter() {
    std::env::remove_var("BDGUARD_LOG");
    assert_eq!(log_filter(), None);

    std::env::set_var("BDGUARD_LOG", "  ");
    assert_eq!(log_filter(), None);

    std::env::set_var("BDGUARD_LOG", "bdguard=debug");
    assert_eq!(log_filter().as_deref(), Some("bdguard=debug"));
    std::env::remove_var("BDGUARD_LOG");
}

#[test]
fn test_bd_binary() {
    std::env::remove_var("BDGUARD_BD");
    assert_eq!(bd_binary(), None);

    std::env::set_var("BDGUARD_BD", "/opt/beads/bin/bd");
    assert_eq!(bd_binary(), Some(PathBuf::from("/opt/beads/bin/bd")));
    std::env::remove_var("BDGUARD_BD");
}

#[test]
fn test_timeout_secs() {
    std::env::remove_var("BDGUARD_TIMEOUT_SECS");
    assert_eq!(timeout_secs(), None);

    std::env::set_var("BDGUARD_TIMEOUT_SECS", "30");
    assert_eq!(timeout_secs(), Some(30));

    std::env::set_var("BDGUARD_TIMEOUT_SECS", "0");
    assert_eq!(timeout_secs(), None);

    std::env::set_var("BDGUARD_TIMEOUT_SECS", "soon");
    assert_eq!(timeout_secs(), None);
    std::env::remove_var("BDGUARD_TIMEOUT_SECS");
}
