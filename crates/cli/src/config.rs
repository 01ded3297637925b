// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Guard configuration.
//!
//! Configuration is stored in `.beads/guard.toml` under the project root and
//! includes:
//! - `bd`: the tracker binary to run (default `"bd"`)
//! - `timeout_secs`: limit for each tracker call (default 10)
//! - `log_file`: diagnostics log, relative to the project root (default
//!   `.beads/bdguard.log`)

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

const BEADS_DIR_NAME: &str = ".beads";
const CONFIG_FILE_NAME: &str = "guard.toml";
const LOG_FILE_NAME: &str = "bdguard.log";

/// Files whose presence in `.beads/` marks a real tracker rather than a
/// registry-only directory.
const TRACKER_MARKERS: [&str; 2] = ["beads.db", "issues.jsonl"];

pub const DEFAULT_BD: &str = "bd";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Guard configuration stored in `.beads/guard.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Tracker binary, looked up on `PATH` unless it contains a separator.
    pub bd: PathBuf,
    /// Seconds before a tracker call is killed.
    pub timeout_secs: u64,
    /// Diagnostics log, relative to the project root.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bd: PathBuf::from(DEFAULT_BD),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
        }
    }
}

impl Config {
    /// Loads configuration for the project at `root`. A missing file yields
    /// the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(BEADS_DIR_NAME).join(CONFIG_FILE_NAME);
        let content = match fs::read_to_string(&config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(Error::Config(format!("failed to read config: {}", e))),
        };
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        if config.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be at least 1".to_string()));
        }
        Ok(config)
    }

    /// Replaces the binary and timeout with any override that is present.
    #[must_use]
    pub fn with_overrides(mut self, bd: Option<PathBuf>, timeout_secs: Option<u64>) -> Self {
        if let Some(bd) = bd {
            self.bd = bd;
        }
        if let Some(secs) = timeout_secs.filter(|s| *s > 0) {
            self.timeout_secs = secs;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Where diagnostics are written. Without a project root there is only a
    /// log file when an absolute one is configured.
    pub fn log_path(&self, root: Option<&Path>) -> Option<PathBuf> {
        match (&self.log_file, root) {
            (Some(file), _) if file.is_absolute() => Some(file.clone()),
            (Some(file), Some(root)) => Some(root.join(file)),
            (None, Some(root)) => Some(root.join(BEADS_DIR_NAME).join(LOG_FILE_NAME)),
            (_, None) => None,
        }
    }
}

/// Finds the project root by walking up from `start` to the first directory
/// whose `.beads/` holds a tracker database.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let start = start
        .canonicalize()
        .unwrap_or_else(|_| start.to_path_buf());
    start
        .ancestors()
        .find(|dir| {
            let beads_dir = dir.join(BEADS_DIR_NAME);
            TRACKER_MARKERS
                .iter()
                .any(|marker| beads_dir.join(marker).exists())
        })
        .map(Path::to_path_buf)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
