// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job dependency validation.
//!
//! A job may only depend on visible jobs of strictly earlier stages. This
//! runs once per document, after stage indexes are assigned.

use crate::error::ValidationError;
use crate::types::JobDefinition;
use indexmap::IndexMap;

/// Check every declared dependency, in job then declaration order.
pub fn validate_dependencies(jobs: &IndexMap<String, JobDefinition>) -> Result<(), ValidationError> {
    for job in jobs.values() {
        for dependency in &job.dependencies {
            let target = jobs
                .get(dependency)
                .ok_or_else(|| ValidationError::UndefinedDependency {
                    job: job.name.clone(),
                    dependency: dependency.clone(),
                })?;

            if target.stage_idx >= job.stage_idx {
                return Err(ValidationError::DependencyNotInPriorStage {
                    job: job.name.clone(),
                    dependency: dependency.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "dependencies_tests.rs"]
mod tests;
