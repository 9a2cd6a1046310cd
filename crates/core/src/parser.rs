// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! YAML loading for pipeline documents (syntactic layer).
//!
//! Turns YAML text into a [`Node`] tree with anchors, aliases and `<<`
//! merge keys expanded. No validation is performed at this layer -
//! that's the job of the validator.

use crate::tree::Node;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// YAML syntax error
    #[error("YAML syntax error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error reading file
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a pipeline document from YAML content.
///
/// # Example
///
/// ```ignore
/// let tree = parse_config("rspec:\n  script: rspec\n")?;
/// assert!(tree.as_mapping().unwrap().contains_key("rspec"));
/// ```
pub fn parse_config(content: &str) -> Result<Node, ParseError> {
    let mut value: serde_yaml::Value = serde_yaml::from_str(content)?;
    value.apply_merge()?;
    Ok(Node::from(value))
}

/// Parse a pipeline document from a YAML file.
pub fn parse_config_file(path: &Path) -> Result<Node, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|e| ParseError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_config(&content)
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
