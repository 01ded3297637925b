// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod check;
pub mod hook;

use std::path::{Path, PathBuf};

use crate::bd::BdTracker;
use crate::config::{find_project_root, Config};
use crate::env;
use crate::logging::setup_logging;

/// Settings given on the command line. They beat both the environment and
/// `guard.toml`.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bd: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

/// The project a command runs against, with its resolved configuration.
#[derive(Debug)]
pub struct Project {
    pub root: Option<PathBuf>,
    pub config: Config,
}

impl Project {
    /// Locates the project from `cwd`, resolves configuration and starts
    /// file logging. A broken `guard.toml` falls back to the defaults.
    pub fn open(cwd: &Path, overrides: &Overrides) -> Self {
        let root = find_project_root(cwd);
        let (config, load_error) = match root.as_deref().map(Config::load).transpose() {
            Ok(config) => (config.unwrap_or_default(), None),
            Err(e) => (Config::default(), Some(e)),
        };
        let config = config
            .with_overrides(env::bd_binary(), env::timeout_secs())
            .with_overrides(overrides.bd.clone(), overrides.timeout_secs);

        setup_logging(config.log_path(root.as_deref()).as_deref());
        if let Some(e) = load_error {
            tracing::warn!("{}; using defaults", e);
        }
        tracing::debug!(
            root = ?root,
            bd = %config.bd.display(),
            timeout_secs = config.timeout_secs,
            "resolved configuration"
        );

        Project { root, config }
    }

    pub fn tracker(&self) -> BdTracker {
        BdTracker::new(&self.config.bd, self.config.timeout()).in_dir(self.root.as_deref())
    }
}
