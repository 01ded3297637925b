// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// A stand-in for `bd` that keeps issues as one file per id under
/// `state/issues/`, each holding `status parent kind` (`-` for no parent).
const FAKE_BD: &str = r#"#!/bin/sh
STATE="$(dirname "$0")/state"
echo "$*" >> "$STATE/calls"

json() {
  read -r status parent kind < "$STATE/issues/$1"
  printf '{"id":"%s","status":"%s","labels":["type:%s"]' "$1" "$status" "$kind"
  if [ "$parent" != "-" ]; then printf ',"parent":"%s"' "$parent"; fi
  printf '}'
}

case "$1" in
show)
  [ -f "$STATE/issues/$2" ] || { echo "no issue found: $2" >&2; exit 1; }
  printf '['; json "$2"; printf ']\n' ;;
list)
  sep=''
  printf '['
  for f in "$STATE"/issues/*; do
    [ -f "$f" ] || continue
    id=$(basename "$f")
    read -r status parent kind < "$f"
    if [ "$parent" = "$3" ]; then printf '%s' "$sep"; json "$id"; sep=','; fi
  done
  printf ']\n' ;;
dep)
  if [ "$2" = "list" ]; then
    if [ -f "$STATE/blockers/$3" ]; then
      printf '[{"issue_id":"%s","depends_on_id":"%s","type":"blocks"}]\n' "$3" "$(cat "$STATE/blockers/$3")"
    else
      printf '[]\n'
    fi
  else
    echo "$2" > "$STATE/blockers/$4"
  fi ;;
update)
  read -r status parent kind < "$STATE/issues/$2"
  echo "$4 $parent $kind" > "$STATE/issues/$2" ;;
close)
  read -r status parent kind < "$STATE/issues/$2"
  echo "closed $parent $kind" > "$STATE/issues/$2"
  echo "$2 $4" >> "$STATE/closed" ;;
admin)
  echo "$*" >> "$STATE/compacted" ;;
*)
  echo "unknown command: $1" >&2
  exit 1 ;;
esac
"#;

pub fn bdguard() -> Command {
    let mut cmd = cargo_bin_cmd!("bdguard");
    cmd.env_remove("BDGUARD_BD")
        .env_remove("BDGUARD_TIMEOUT_SECS")
        .env_remove("BDGUARD_LOG");
    cmd
}

/// The JSON envelope an agent harness sends for a shell tool call.
pub fn envelope(event: &str, command: &str, cwd: &Path) -> String {
    serde_json::json!({
        "session_id": "test-session",
        "hook_event_name": event,
        "tool_name": "Bash",
        "tool_input": { "command": command },
        "cwd": cwd,
    })
    .to_string()
}

/// A beads project backed by the fake `bd`.
pub struct Project {
    pub temp: TempDir,
}

impl Project {
    /// Creates a project holding `(id, status, parent, kind)` issues.
    pub fn new(issues: &[(&str, &str, &str, &str)]) -> Self {
        let temp = TempDir::new().unwrap();
        let beads = temp.path().join(".beads");
        fs::create_dir_all(&beads).unwrap();
        fs::write(beads.join("beads.db"), "").unwrap();

        let bin = temp.path().join("bin");
        for dir in ["state/issues", "state/blockers"] {
            fs::create_dir_all(bin.join(dir)).unwrap();
        }
        fs::write(bin.join("bd"), FAKE_BD).unwrap();
        make_executable(&bin.join("bd"));

        let project = Project { temp };
        for (id, status, parent, kind) in issues {
            project.set_issue(id, status, parent, kind);
        }
        project
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn bd_path(&self) -> PathBuf {
        self.root().join("bin").join("bd")
    }

    fn state(&self, name: &str) -> PathBuf {
        self.root().join("bin").join("state").join(name)
    }

    pub fn set_issue(&self, id: &str, status: &str, parent: &str, kind: &str) {
        fs::write(
            self.state("issues").join(id),
            format!("{} {} {}\n", status, parent, kind),
        )
        .unwrap();
    }

    /// Records that `from` blocks `to`, as a completed `bd dep` would.
    pub fn add_blocker(&self, from: &str, to: &str) {
        fs::write(self.state("blockers").join(to), format!("{}\n", from)).unwrap();
    }

    pub fn status(&self, id: &str) -> String {
        fs::read_to_string(self.state("issues").join(id))
            .unwrap()
            .split_whitespace()
            .next()
            .unwrap()
            .to_string()
    }

    /// Lines of a state log (`calls`, `closed`, `compacted`), empty if the
    /// file was never written.
    pub fn log(&self, name: &str) -> Vec<String> {
        fs::read_to_string(self.state(name))
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    /// Runs the hook with the fake `bd` for one tool call.
    pub fn hook(&self, event: &str, command: &str) -> assert_cmd::assert::Assert {
        bdguard()
            .arg("hook")
            .arg("--bd")
            .arg(self.bd_path())
            .write_stdin(envelope(event, command, self.root()))
            .assert()
    }

    pub fn pre(&self, command: &str) -> assert_cmd::assert::Assert {
        self.hook("PreToolUse", command)
    }

    pub fn post(&self, command: &str) -> assert_cmd::assert::Assert {
        self.hook("PostToolUse", command)
    }
}

/// Writes an executable `sh` script running `body`.
pub fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    make_executable(path);
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) {}
