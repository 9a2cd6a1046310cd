// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pipec compile`: print the builds of a pipeline for one ref as JSON

use super::load;
use crate::config::ProjectConfig;
use anyhow::Result;
use clap::Args;
use pipec_core::BuildSpec;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Pipeline document [default: .gitlab-ci.yml]
    pub file: Option<PathBuf>,

    /// Branch or tag name the pipeline runs for
    #[arg(long = "ref", env = "PIPEC_REF")]
    pub ref_name: String,

    /// The ref is a tag
    #[arg(long)]
    pub tag: bool,

    /// The pipeline was started by a trigger
    #[arg(long)]
    pub trigger: bool,

    /// Only compile jobs of this stage
    #[arg(long)]
    pub stage: Option<String>,

    /// Repository path matched by `name@path` rules
    #[arg(long, env = "PIPEC_REPOSITORY")]
    pub repository: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn handle(args: CompileArgs, config: &ProjectConfig) -> Result<()> {
    let mut pipeline = load(&config.pipeline_file(args.file))?;
    if let Some(repository) = config.repository(args.repository) {
        pipeline = pipeline.with_repository_path(repository);
    }

    let builds = match &args.stage {
        Some(stage) => {
            if !pipeline.stages().contains(stage) {
                warn!(stage = %stage, "stage is not declared in the pipeline");
            }
            pipeline.compile_for_stage_and_ref(stage, &args.ref_name, args.tag, args.trigger)
        }
        None => pipeline.compile_all(&args.ref_name, args.tag, args.trigger),
    };
    debug!(ref_name = %args.ref_name, builds = builds.len(), "compiled pipeline");

    println!("{}", render(&builds, args.pretty || config.pretty)?);
    Ok(())
}

/// JSON array of builds
pub fn render(builds: &[BuildSpec], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(builds)
    } else {
        serde_json::to_string(builds)
    }
}
