// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::parser::parse_config;
use crate::validator::validate;

fn jobs(entries: &[(&str, usize, &[&str])]) -> IndexMap<String, JobDefinition> {
    let tree = parse_config("placeholder:\n  script: 'true'\n").unwrap();
    let template = validate(&tree).unwrap().jobs["placeholder"].clone();

    entries
        .iter()
        .map(|(name, stage_idx, deps)| {
            let mut job = template.clone();
            job.name = name.to_string();
            job.stage_idx = *stage_idx;
            job.dependencies = deps.iter().map(|d| d.to_string()).collect();
            (name.to_string(), job)
        })
        .collect()
}

#[test]
fn dependency_on_earlier_stage_is_valid() {
    let jobs = jobs(&[("build", 0, &[]), ("test", 1, &["build"])]);
    assert!(validate_dependencies(&jobs).is_ok());
}

#[test]
fn undefined_dependency() {
    let jobs = jobs(&[("test", 1, &["missing"])]);
    assert_eq!(
        validate_dependencies(&jobs),
        Err(ValidationError::UndefinedDependency {
            job: "test".to_string(),
            dependency: "missing".to_string(),
        })
    );
}

#[test]
fn dependency_in_same_stage_is_rejected() {
    let jobs = jobs(&[("lint", 1, &[]), ("test", 1, &["lint"])]);
    let err = validate_dependencies(&jobs).unwrap_err();
    assert_eq!(
        err.to_string(),
        "test job: dependency lint is not defined in prior stages"
    );
}

#[test]
fn dependency_in_later_stage_is_rejected() {
    let jobs = jobs(&[("test", 1, &["deploy"]), ("deploy", 2, &[])]);
    assert!(matches!(
        validate_dependencies(&jobs),
        Err(ValidationError::DependencyNotInPriorStage { dependency, .. }) if dependency == "deploy"
    ));
}

#[test]
fn self_dependency_is_rejected() {
    let jobs = jobs(&[("test", 1, &["test"])]);
    assert!(matches!(
        validate_dependencies(&jobs),
        Err(ValidationError::DependencyNotInPriorStage { .. })
    ));
}

#[test]
fn first_violation_wins() {
    let jobs = jobs(&[
        ("build", 0, &[]),
        ("test", 1, &["build", "nope", "deploy"]),
        ("deploy", 2, &["ghost"]),
    ]);
    assert_eq!(
        validate_dependencies(&jobs).unwrap_err().to_string(),
        "test job: undefined dependency: nope"
    );
}
