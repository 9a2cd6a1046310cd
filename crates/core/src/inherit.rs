// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Inheritance of global defaults into jobs.
//!
//! Each field has its own pure resolver. A job value always replaces the
//! global one as a whole; nothing is merged except variables.

use crate::types::{ArtifactsConfig, CacheConfig, ConfigDocument, JobDefinition, Variables};

/// A job with every inherited field resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveJob {
    /// `before_script` then `script`, newline-joined
    pub commands: String,
    pub after_script: Option<Vec<String>>,
    pub image: Option<String>,
    pub services: Option<Vec<String>>,
    pub cache: Option<CacheConfig>,
    pub artifacts: Option<ArtifactsConfig>,
    pub tags: Vec<String>,
    pub variables: Vec<(String, String)>,
}

/// Resolve every inherited field of `job` against `document`.
pub fn resolve_job(document: &ConfigDocument, job: &JobDefinition) -> EffectiveJob {
    EffectiveJob {
        commands: resolve_commands(document.before_script.as_deref(), job),
        after_script: resolve(&job.after_script, &document.after_script),
        image: resolve(&job.image, &document.image),
        services: resolve(&job.services, &document.services),
        cache: resolve(&job.cache, &document.cache),
        artifacts: resolve(&job.artifacts, &document.artifacts),
        tags: resolve(&job.tags, &document.tags).unwrap_or_default(),
        variables: resolve_variables(&document.variables, job.variables.as_ref()),
    }
}

/// The job value if declared, else the global one
pub fn resolve<T: Clone>(job: &Option<T>, global: &Option<T>) -> Option<T> {
    job.as_ref().or(global.as_ref()).cloned()
}

/// Job `before_script` (or the global one) followed by the job script.
pub fn resolve_commands(global_before: Option<&[String]>, job: &JobDefinition) -> String {
    let before = job.before_script.as_deref().or(global_before).unwrap_or(&[]);
    before
        .iter()
        .chain(job.script.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Global variables overlaid by job variables.
///
/// Global-only keys come first in global order, then job keys in job order,
/// so an overridden key moves to its job position.
pub fn resolve_variables(global: &Variables, job: Option<&Variables>) -> Vec<(String, String)> {
    let Some(job) = job else {
        return global
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
    };

    global
        .iter()
        .filter(|(key, _)| !job.contains_key(*key))
        .chain(job.iter())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
#[path = "inherit_tests.rs"]
mod tests;
