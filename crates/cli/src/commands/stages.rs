// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `pipec stages`: print the resolved stage list

use super::load;
use crate::config::ProjectConfig;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct StagesArgs {
    /// Pipeline document [default: .gitlab-ci.yml]
    pub file: Option<PathBuf>,
}

pub fn handle(args: StagesArgs, config: &ProjectConfig) -> Result<()> {
    let pipeline = load(&config.pipeline_file(args.file))?;
    for stage in pipeline.stages().iter() {
        println!("{}", stage);
    }
    Ok(())
}
