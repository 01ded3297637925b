// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! [`Tracker`] backed by the `bd` command-line tool.
//!
//! Each call runs one `bd` subprocess from the project root with a hard
//! timeout. Reads use `--json`; writes only check the exit status.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use bdguard_core::error::{Error, Result};
use bdguard_core::{Issue, IssueType, Status, Tracker};
use serde::Deserialize;

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const PARENT_CHILD_DEP: &str = "parent-child";

/// An issue as `bd show --json` and `bd list --json` print it.
#[derive(Debug, Deserialize)]
struct IssueRecord {
    id: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    dependencies: Vec<DependencyRecord>,
}

#[derive(Debug, Deserialize)]
struct DependencyRecord {
    #[serde(default)]
    issue_id: Option<String>,
    #[serde(default)]
    depends_on_id: Option<String>,
    #[serde(default, rename = "type", alias = "dependency_type")]
    dep_type: Option<String>,
}

impl IssueRecord {
    /// Converts to an [`Issue`]. Records with a status outside the known set
    /// (tombstones, for instance) are dropped.
    fn into_issue(self) -> Option<Issue> {
        let status = match self.status.parse::<Status>() {
            Ok(status) => status,
            Err(_) => {
                tracing::debug!("skipping {} with status {:?}", self.id, self.status);
                return None;
            }
        };
        let parent = self.parent.filter(|p| !p.is_empty()).or_else(|| {
            self.dependencies
                .iter()
                .find(|d| {
                    d.dep_type.as_deref() == Some(PARENT_CHILD_DEP)
                        && d.issue_id.as_deref().is_none_or(|i| i == self.id)
                })
                .and_then(|d| d.depends_on_id.clone())
        });
        Some(Issue {
            id: self.id,
            status,
            issue_type: IssueType::from_labels(&self.labels),
            parent,
        })
    }
}

/// Parses `bd show --json` output, which is a single object or an array
/// holding it.
fn parse_show(id: &str, stdout: &str) -> Result<Issue> {
    let value: serde_json::Value = serde_json::from_str(stdout)?;
    let value = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| Error::IssueNotFound(id.to_string()))?,
        other => other,
    };
    let record: IssueRecord = serde_json::from_value(value)?;
    record
        .into_issue()
        .ok_or_else(|| Error::IssueNotFound(id.to_string()))
}

fn parse_list(stdout: &str) -> Result<Vec<Issue>> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }
    let records: Vec<IssueRecord> = serde_json::from_str(stdout)?;
    Ok(records
        .into_iter()
        .filter_map(IssueRecord::into_issue)
        .collect())
}

fn parse_dependencies(stdout: &str) -> Result<bool> {
    if stdout.trim().is_empty() {
        return Ok(false);
    }
    let deps: Vec<serde_json::Value> = serde_json::from_str(stdout)?;
    Ok(!deps.is_empty())
}

/// Runs `bd` as a subprocess.
#[derive(Debug, Clone)]
pub struct BdTracker {
    program: PathBuf,
    root: Option<PathBuf>,
    timeout: Duration,
}

impl BdTracker {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        BdTracker {
            program: program.into(),
            root: None,
            timeout,
        }
    }

    /// Runs every call from `root` so `bd` finds the project's `.beads/`.
    #[must_use]
    pub fn in_dir(mut self, root: Option<&Path>) -> Self {
        self.root = root.map(Path::to_path_buf);
        self
    }

    /// Runs `bd <args>` and returns its stdout. A non-zero exit, a spawn
    /// failure or a timeout is an error.
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        let started = Instant::now();

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(root) = &self.root {
            cmd.current_dir(root);
        }
        let mut child = cmd.spawn().map_err(|e| Error::Tracker {
            command: command.clone(),
            reason: format!("failed to spawn {}: {}", self.program.display(), e),
        })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let out_handle = thread::spawn(move || drain(stdout));
        let err_handle = thread::spawn(move || drain(stderr));

        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if started.elapsed() >= self.timeout {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!("bd {} timed out after {:?}", command, self.timeout);
                return Err(Error::Timeout {
                    command,
                    secs: self.timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        let stdout = out_handle.join().unwrap_or_default();
        let stderr = err_handle.join().unwrap_or_default();
        tracing::debug!(
            "bd {} exited with {} in {:?}",
            command,
            status,
            started.elapsed()
        );
        check_status(command, status, &stderr)?;
        Ok(stdout)
    }
}

fn drain<R: Read>(pipe: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn check_status(command: String, status: ExitStatus, stderr: &str) -> Result<()> {
    if status.success() {
        return Ok(());
    }
    let stderr = stderr.trim();
    let reason = if stderr.is_empty() {
        format!("exited with {}", status)
    } else {
        stderr.to_string()
    };
    Err(Error::Tracker { command, reason })
}

impl Tracker for BdTracker {
    fn get(&self, id: &str) -> Result<Issue> {
        let stdout = self.run(&["show", id, "--json"])?;
        parse_show(id, &stdout)
    }

    fn children_of(&self, id: &str) -> Result<Vec<Issue>> {
        let stdout = self.run(&["list", "--parent", id, "--json"])?;
        parse_list(&stdout)
    }

    fn has_blocking_dependency(&self, id: &str) -> Result<bool> {
        let stdout = self.run(&["dep", "list", id, "--type", "blocks", "--json"])?;
        parse_dependencies(&stdout)
    }

    fn set_status(&self, id: &str, status: Status) -> Result<()> {
        self.run(&["update", id, "--status", status.as_str()]).map(drop)
    }

    fn close(&self, id: &str, reason: &str) -> Result<()> {
        self.run(&["close", id, "--reason", reason]).map(drop)
    }

    fn purge_tombstones(&self) -> Result<()> {
        self.run(&["admin", "compact", "--purge-tombstones"]).map(drop)
    }
}

#[cfg(test)]
#[path = "bd_tests.rs"]
mod tests;
