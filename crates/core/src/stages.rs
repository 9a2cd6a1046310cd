// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stage resolution

use serde::Serialize;
use std::fmt;

/// Stages used when a document declares none
pub const DEFAULT_STAGES: [&str; 3] = ["build", "test", "deploy"];

/// Stage a job runs in when it does not name one
pub const DEFAULT_JOB_STAGE: &str = "test";

/// The ordered stages of a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StageList(Vec<String>);

impl Default for StageList {
    fn default() -> Self {
        Self(DEFAULT_STAGES.iter().map(|s| s.to_string()).collect())
    }
}

impl StageList {
    pub fn new(stages: Vec<String>) -> Self {
        Self(stages)
    }

    /// Zero-based position of a stage
    pub fn index_of(&self, stage: &str) -> Option<usize> {
        self.0.iter().position(|s| s == stage)
    }

    pub fn contains(&self, stage: &str) -> bool {
        self.index_of(stage).is_some()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for StageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

#[cfg(test)]
#[path = "stages_tests.rs"]
mod tests;
