// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pipec-core: CI pipeline configuration compiler
//!
//! This crate provides:
//! - A YAML front end producing a plain configuration tree
//! - Fail-fast schema validation into a typed document
//! - Inheritance of global defaults, `only`/`except` ref rules and stage
//!   resolution
//! - Build assembly for a ref, optionally restricted to one stage
//!
//! Validation runs once per document; the resulting [`Pipeline`] is
//! immutable and can be compiled for any number of refs.

pub mod tree;

// Front end
pub mod parser;

// Document model
pub mod error;
pub mod stages;
pub mod types;

// Validation (order matters for dependencies)
pub mod rules;
pub mod validator;
pub mod dependencies;

// Compilation
pub mod inherit;
pub mod compiler;
pub mod loader;

// Re-exports
pub use compiler::{BuildOptions, BuildSpec, CompileContext, Pipeline, YamlVariable};
pub use error::{ErrorKind, ValidationError};
pub use loader::{load_pipeline, load_pipeline_file, LoadError};
pub use parser::{parse_config, parse_config_file, ParseError};
pub use stages::{StageList, DEFAULT_JOB_STAGE, DEFAULT_STAGES};
pub use tree::{Key, Mapping, Node};
pub use types::{
    ArtifactsConfig, ArtifactsWhen, CacheConfig, CachePolicy, ConfigDocument, JobDefinition,
    Variables, When,
};
pub use validator::validate;
