// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration (`.pipec.toml`).
//!
//! Every key is optional. Command-line flags win over file values, which win
//! over the built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the project configuration file
pub const CONFIG_FILE: &str = ".pipec.toml";

/// Pipeline document used when neither flag nor config names one
pub const DEFAULT_PIPELINE_FILE: &str = ".gitlab-ci.yml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Pipeline document, relative to the config file
    pub file: Option<PathBuf>,
    /// Repository path used by `name@path` rules
    pub repository: Option<String>,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl ProjectConfig {
    /// Load `.pipec.toml` from `dir`, or defaults if there is none.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if let Some(file) = config.file.take() {
            config.file = Some(dir.join(file));
        }
        debug!(path = %path.display(), "loaded project config");
        Ok(config)
    }

    /// The pipeline document to read: flag, then config, then default
    pub fn pipeline_file(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PIPELINE_FILE))
    }

    pub fn repository(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.repository.clone())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
