// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]
#![allow(deprecated)]

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

pub const BASIC_PIPELINE: &str = r#"
stages: [build, test, deploy]

before_script: [bundle install]

compile:
  stage: build
  script: [make]

rspec:
  script: [rspec]
  except: [tags]

release:
  stage: deploy
  script: [cap deploy]
  only: [tags]
"#;

/// Temporary project directory holding the given files.
pub fn project(files: &[(&str, &str)]) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    for (name, content) in files {
        let path = temp.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write project file");
    }
    temp
}

/// `pipec` running in `dir` with a clean environment.
pub fn pipec(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pipec").expect("pipec binary is built");
    cmd.current_dir(dir.path())
        .env_remove("PIPEC_REF")
        .env_remove("PIPEC_REPOSITORY")
        .env_remove("RUST_LOG");
    cmd
}

/// Parse stdout of a successful `compile` as JSON.
pub fn compiled(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = pipec(dir)
        .arg("compile")
        .args(args)
        .output()
        .expect("Failed to run pipec");
    assert!(output.status.success(), "pipec compile failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("compile prints JSON")
}

/// Names of the compiled builds, in order.
pub fn build_names(builds: &serde_json::Value) -> Vec<String> {
    builds
        .as_array()
        .expect("compile prints an array")
        .iter()
        .map(|b| b["name"].as_str().unwrap_or_default().to_string())
        .collect()
}
