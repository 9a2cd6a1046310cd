// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build assembly.
//!
//! A [`Pipeline`] is validated once and then compiled for any number of
//! refs. Compiling is pure: the document is never mutated, so a pipeline can
//! be shared between threads behind an `Arc`.
//!
//! # Example
//!
//! ```ignore
//! use pipec_core::{parse_config, CompileContext, Pipeline};
//!
//! let pipeline = Pipeline::new(&parse_config(yaml)?)?;
//! let builds = pipeline.compile(&CompileContext::new("master"));
//! ```

use crate::error::ValidationError;
use crate::inherit::resolve_job;
use crate::rules::included;
use crate::stages::StageList;
use crate::tree::Node;
use crate::types::{ArtifactsConfig, CacheConfig, ConfigDocument, JobDefinition, When};
use crate::validator::validate;
use serde::Serialize;
use tracing::trace;

/// Per-compile input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileContext {
    /// Only jobs of this stage, when set
    pub stage: Option<String>,
    pub ref_name: String,
    pub is_tag: bool,
    pub has_trigger: bool,
    /// Repository the pipeline runs for, matched by `name@path` rules
    pub repository_path: Option<String>,
}

impl CompileContext {
    pub fn new(ref_name: impl Into<String>) -> Self {
        Self {
            ref_name: ref_name.into(),
            ..Self::default()
        }
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    pub fn with_tag(mut self, is_tag: bool) -> Self {
        self.is_tag = is_tag;
        self
    }

    pub fn with_trigger(mut self, has_trigger: bool) -> Self {
        self.has_trigger = has_trigger;
        self
    }

    pub fn with_repository_path(mut self, path: impl Into<String>) -> Self {
        self.repository_path = Some(path.into());
        self
    }
}

/// A variable attached to a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YamlVariable {
    pub key: String,
    pub value: String,
    pub public: bool,
}

/// Runner options; only keys with a resolved value are present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<ArtifactsConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_script: Option<Vec<String>>,
}

/// A compiled, ready-to-schedule job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildSpec {
    pub stage: String,
    pub stage_idx: usize,
    pub name: String,
    pub commands: String,
    pub tag_list: Vec<String>,
    pub options: BuildOptions,
    pub allow_failure: bool,
    pub when: When,
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_regex: Option<String>,
    pub yaml_variables: Vec<YamlVariable>,
}

/// A validated pipeline document, ready to compile
#[derive(Debug, Clone)]
pub struct Pipeline {
    document: ConfigDocument,
    repository_path: Option<String>,
}

impl Pipeline {
    /// Validate a configuration tree.
    pub fn new(tree: &Node) -> Result<Self, ValidationError> {
        validate(tree).map(Self::from_document)
    }

    pub fn from_document(document: ConfigDocument) -> Self {
        Self {
            document,
            repository_path: None,
        }
    }

    /// Repository used by the positional entry points for `name@path` rules
    pub fn with_repository_path(mut self, path: impl Into<String>) -> Self {
        self.repository_path = Some(path.into());
        self
    }

    pub fn stages(&self) -> &StageList {
        &self.document.stages
    }

    pub fn job(&self, name: &str) -> Option<&JobDefinition> {
        self.document.job(name)
    }

    /// Visible job names in declaration order
    pub fn job_names(&self) -> impl Iterator<Item = &str> {
        self.document.jobs.keys().map(String::as_str)
    }

    /// Builds of one stage for a ref
    pub fn compile_for_stage_and_ref(
        &self,
        stage: &str,
        ref_name: &str,
        is_tag: bool,
        has_trigger: bool,
    ) -> Vec<BuildSpec> {
        let ctx = self.context(ref_name, is_tag, has_trigger).with_stage(stage);
        self.compile(&ctx)
    }

    /// Builds of every stage for a ref
    pub fn compile_all(&self, ref_name: &str, is_tag: bool, has_trigger: bool) -> Vec<BuildSpec> {
        self.compile(&self.context(ref_name, is_tag, has_trigger))
    }

    /// Compile the jobs selected by `ctx`, in declaration order.
    pub fn compile(&self, ctx: &CompileContext) -> Vec<BuildSpec> {
        self.document
            .jobs
            .values()
            .filter(|job| ctx.stage.as_deref().map_or(true, |stage| job.stage == stage))
            .filter(|job| {
                let keep = included(job, ctx);
                trace!(job = %job.name, ref_name = %ctx.ref_name, keep, "evaluated ref rules");
                keep
            })
            .map(|job| self.assemble(job))
            .collect()
    }

    fn context(&self, ref_name: &str, is_tag: bool, has_trigger: bool) -> CompileContext {
        CompileContext {
            stage: None,
            ref_name: ref_name.to_string(),
            is_tag,
            has_trigger,
            repository_path: self.repository_path.clone(),
        }
    }

    fn assemble(&self, job: &JobDefinition) -> BuildSpec {
        let effective = resolve_job(&self.document, job);

        BuildSpec {
            stage: job.stage.clone(),
            stage_idx: job.stage_idx,
            name: job.name.clone(),
            commands: effective.commands,
            tag_list: effective.tags,
            options: BuildOptions {
                image: effective.image,
                services: effective.services,
                cache: effective.cache,
                artifacts: effective.artifacts,
                after_script: effective.after_script,
            },
            allow_failure: job.allow_failure,
            when: job.when,
            environment: job.environment.clone(),
            coverage_regex: job.coverage.clone(),
            yaml_variables: effective
                .variables
                .into_iter()
                .map(|(key, value)| YamlVariable {
                    key,
                    value,
                    public: true,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
