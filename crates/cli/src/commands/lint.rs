// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pipec lint`: validate a pipeline document

use super::load;
use crate::config::ProjectConfig;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub struct LintArgs {
    /// Pipeline document [default: .gitlab-ci.yml]
    pub file: Option<PathBuf>,
}

pub fn handle(args: LintArgs, config: &ProjectConfig) -> Result<()> {
    let path = config.pipeline_file(args.file);
    let pipeline = load(&path)?;

    info!(
        path = %path.display(),
        jobs = pipeline.job_names().count(),
        "pipeline is valid"
    );
    println!("Syntax is correct");
    Ok(())
}
