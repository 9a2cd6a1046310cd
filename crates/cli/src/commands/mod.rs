// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod compile;
pub mod lint;
pub mod stages;

use crate::error::CliError;
use pipec_core::{load_pipeline_file, Pipeline};
use std::path::Path;

/// Load and validate the pipeline at `path` for a command.
pub fn load(path: &Path) -> Result<Pipeline, CliError> {
    load_pipeline_file(path).map_err(|err| CliError::load_failed(path, err))
}
