// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation errors.
//!
//! Every error renders to the exact message shown to pipeline authors, so
//! callers can surface `to_string()` verbatim. Paths are colon-separated
//! (`jobs:rspec:cache:key`); the global scope has no prefix.

use thiserror::Error;

/// Broad family of a validation error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed tree: non-hash root or job, bad job names
    Structural,
    /// Wrong shape or value for a recognized key
    Type,
    /// Stages, dependencies, visible jobs
    Semantic,
}

/// The first violation found in a pipeline document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("config should be a hash")]
    RootNotHash,

    #[error("jobs:{0} config should be a hash")]
    JobNotHash(String),

    #[error("jobs:job name can't be blank")]
    BlankJobName,

    #[error("jobs:{0} name should be a symbol")]
    JobNameNotSymbol(String),

    /// `<path> config should be <expected>`
    #[error("{path} config should be {expected}")]
    InvalidConfig {
        path: String,
        expected: &'static str,
    },

    /// `<path> <attribute> should be <expected>`
    #[error("{path} {attribute} should be {expected}")]
    InvalidAttribute {
        path: String,
        attribute: &'static str,
        expected: &'static str,
    },

    #[error("{path} config contains unknown keys: {}", .keys.join(", "))]
    UnknownKeys { path: String, keys: Vec<String> },

    #[error("jobs:{0} script can't be blank")]
    MissingScript(String),

    #[error("jobs:{0} environment name can contain only letters, digits, '-', '_', '/', '$', '{{', '}}', '.', and spaces, but it cannot start or end with '/'")]
    InvalidEnvironmentName(String),

    #[error("jobs config should contain at least one visible job")]
    NoVisibleJobs,

    #[error("{job} job: stage parameter should be {}", .stages.join(", "))]
    UndeclaredStage { job: String, stages: Vec<String> },

    #[error("{job} job: undefined dependency: {dependency}")]
    UndefinedDependency { job: String, dependency: String },

    #[error("{job} job: dependency {dependency} is not defined in prior stages")]
    DependencyNotInPriorStage { job: String, dependency: String },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::RootNotHash
            | ValidationError::JobNotHash(_)
            | ValidationError::BlankJobName
            | ValidationError::JobNameNotSymbol(_) => ErrorKind::Structural,
            ValidationError::InvalidConfig { .. }
            | ValidationError::InvalidAttribute { .. }
            | ValidationError::UnknownKeys { .. }
            | ValidationError::MissingScript(_)
            | ValidationError::InvalidEnvironmentName(_) => ErrorKind::Type,
            ValidationError::NoVisibleJobs
            | ValidationError::UndeclaredStage { .. }
            | ValidationError::UndefinedDependency { .. }
            | ValidationError::DependencyNotInPriorStage { .. } => ErrorKind::Semantic,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
