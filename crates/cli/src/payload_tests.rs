// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[test]
fn test_parse_full_envelope() {
    let payload = HookPayload::parse(
        r#"{
            "session_id": "abc",
            "hook_event_name": "PreToolUse",
            "tool_name": "Bash",
            "tool_input": {"command": "bd ready", "description": "pick work"},
            "cwd": "/work/proj"
        }"#,
    )
    .unwrap();
    assert_eq!(payload.command(), Some("bd ready"));
    assert_eq!(payload.cwd, Some(PathBuf::from("/work/proj")));
    assert_eq!(payload.phase(), Phase::Pre);
}

#[test]
fn test_parse_minimal_envelope() {
    let payload = HookPayload::parse(r#"{"tool_input": {"command": "bd close X"}}"#).unwrap();
    assert_eq!(payload.command(), Some("bd close X"));
    assert_eq!(payload.cwd, None);
    assert_eq!(payload.phase(), Phase::Pre);
}

#[parameterized(
    pre = { Some("PreToolUse"), Phase::Pre },
    post = { Some("PostToolUse"), Phase::Post },
    missing = { None, Phase::Pre },
    other = { Some("Notification"), Phase::Pre },
)]
fn test_phase(event: Option<&str>, expected: Phase) {
    let payload = HookPayload {
        hook_event_name: event.map(String::from),
        ..HookPayload::default()
    };
    assert_eq!(payload.phase(), expected);
}

#[test]
fn test_non_shell_tool_has_no_command() {
    let payload =
        HookPayload::parse(r#"{"tool_name": "Edit", "tool_input": {"command": "bd ready"}}"#)
            .unwrap();
    assert_eq!(payload.command(), None);
}

#[parameterized(
    no_tool_input = { r#"{"cwd": "/tmp"}"# },
    no_command = { r#"{"tool_input": {"file_path": "a.rs"}}"# },
    blank_command = { r#"{"tool_input": {"command": "   "}}"# },
)]
fn test_missing_command(raw: &str) {
    assert_eq!(HookPayload::parse(raw).unwrap().command(), None);
}

#[parameterized(
    empty = { "" },
    whitespace = { " \n " },
    not_json = { "bd ready" },
    truncated = { "{\"tool_input\": {" },
    wrong_shape = { r#"{"tool_input": "bd ready"}"# },
)]
fn test_parse_rejects_malformed(raw: &str) {
    assert!(HookPayload::parse(raw).is_err());
}
