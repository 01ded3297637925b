// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The JSON envelope an agent harness sends on stdin for each tool call.

use std::path::PathBuf;

use bdguard_core::Phase;
use serde::Deserialize;

use crate::error::{Error, Result};

const SHELL_TOOL: &str = "Bash";
const POST_EVENT: &str = "PostToolUse";

/// One tool-call notification. Every field is optional; unknown fields are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HookPayload {
    /// Tool being invoked. Absent means a shell tool.
    pub tool_name: Option<String>,
    pub tool_input: ToolInput,
    /// Working directory the command runs in.
    pub cwd: Option<PathBuf>,
    /// `PreToolUse` (default) or `PostToolUse`.
    pub hook_event_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolInput {
    pub command: Option<String>,
}

impl HookPayload {
    /// Parses the raw stdin contents.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::Input("empty input".to_string()));
        }
        Ok(serde_json::from_str(raw)?)
    }

    pub fn phase(&self) -> Phase {
        match self.hook_event_name.as_deref() {
            Some(POST_EVENT) => Phase::Post,
            _ => Phase::Pre,
        }
    }

    /// The shell command to evaluate, if this call runs one.
    pub fn command(&self) -> Option<&str> {
        if self.tool_name.as_deref().is_some_and(|t| t != SHELL_TOOL) {
            return None;
        }
        self.tool_input
            .command
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
