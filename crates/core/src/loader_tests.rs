// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;

#[test]
fn load_valid_pipeline() {
    let pipeline = load_pipeline("rspec:\n  script: rspec\n").unwrap();
    assert_eq!(pipeline.job_names().collect::<Vec<_>>(), vec!["rspec"]);
}

#[test]
fn syntax_error_is_parse_error() {
    let err = load_pipeline("rspec: [unclosed").unwrap_err();
    assert!(matches!(err, LoadError::Parse(ParseError::Yaml(_))));
    assert!(err.validation().is_none());
}

#[test]
fn validation_error_renders_verbatim() {
    let err = load_pipeline("rspec:\n  script: rspec\n  stage: review\n").unwrap_err();
    assert_eq!(
        err.validation(),
        Some(&ValidationError::UndeclaredStage {
            job: "rspec".to_string(),
            stages: vec!["build".into(), "test".into(), "deploy".into()],
        })
    );
    assert_eq!(
        err.to_string(),
        "rspec job: stage parameter should be build, test, deploy"
    );
}

#[test]
fn empty_document_is_not_a_hash() {
    let err = load_pipeline("").unwrap_err();
    assert_eq!(err.to_string(), "config should be a hash");
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "stages: [build]\ncompile:\n  stage: build\n  script: make\n").unwrap();
    let pipeline = load_pipeline_file(file.path()).unwrap();
    assert_eq!(pipeline.stages().len(), 1);
}

#[test]
fn missing_file_is_parse_error() {
    let err = load_pipeline_file(Path::new("/nonexistent/pipeline.yml")).unwrap_err();
    assert!(matches!(err, LoadError::Parse(ParseError::Io { .. })));
}
