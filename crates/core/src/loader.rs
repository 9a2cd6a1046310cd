// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline loader: YAML text to a validated [`Pipeline`].
//!
//! Chains [`parse_config`] and [`Pipeline::new`] so callers holding raw text
//! get a single error type.

use crate::compiler::Pipeline;
use crate::error::ValidationError;
use crate::parser::{parse_config, parse_config_file, ParseError};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a pipeline.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl LoadError {
    /// The validation error, if the document parsed but was rejected
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            LoadError::Validation(err) => Some(err),
            LoadError::Parse(_) => None,
        }
    }
}

/// Parse and validate pipeline YAML.
pub fn load_pipeline(content: &str) -> Result<Pipeline, LoadError> {
    let tree = parse_config(content)?;
    Ok(Pipeline::new(&tree)?)
}

/// Read, parse and validate a pipeline file.
pub fn load_pipeline_file(path: &Path) -> Result<Pipeline, LoadError> {
    debug!(path = %path.display(), "loading pipeline");
    let tree = parse_config_file(path)?;
    Ok(Pipeline::new(&tree)?)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
