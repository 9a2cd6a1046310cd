// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Validation messages are printed verbatim on the first line; the lines
//! after it say where the problem is and what to try next.

use pipec_core::{ErrorKind, LoadError, ParseError, ValidationError};
use std::fmt;
use std::io;
use std::path::Path;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Where or why it happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Builders for the failures the commands report.
impl CliError {
    /// The pipeline file could not be read, parsed or validated.
    pub fn load_failed(path: &Path, err: LoadError) -> Self {
        let missing = matches!(
            &err,
            LoadError::Parse(ParseError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound
        );
        if missing {
            return Self::file_not_found(path).with_source(err);
        }

        let suggestion = match err.validation().map(ValidationError::kind) {
            None if matches!(err, LoadError::Parse(ParseError::Io { .. })) => {
                "Check that the path names a readable file, not a directory"
            }
            None => "Check indentation and quoting of the line named above",
            Some(ErrorKind::Structural) => {
                "Every top-level key that is not a global keyword must be a job hash"
            }
            Some(ErrorKind::Type) => "Check the value shape of the key named in the message",
            Some(ErrorKind::Semantic) => {
                "Declare the stage in `stages:` or depend only on jobs of earlier stages"
            }
        };

        CliError::new(err.to_string())
            .with_context(format!("in {}", path.display()))
            .with_suggestion(suggestion)
            .with_source(err)
    }

    /// No pipeline file where one was expected.
    pub fn file_not_found(path: &Path) -> Self {
        CliError::new(format!("Pipeline file '{}' not found", path.display()))
            .with_context("pipec reads .gitlab-ci.yml from the current directory by default")
            .with_suggestion("Pass the file explicitly: pipec lint path/to/pipeline.yml")
            .with_suggestion("Or set `file = \"...\"` in .pipec.toml")
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
