// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::parser::parse_config;
use crate::validator::validate;

fn document(yaml: &str) -> ConfigDocument {
    validate(&parse_config(yaml).unwrap()).unwrap()
}

fn effective(yaml: &str, job: &str) -> EffectiveJob {
    let doc = document(yaml);
    resolve_job(&doc, &doc.jobs[job])
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn global_before_script_is_prepended() {
    let job = effective(
        r#"
before_script: [pwd]
rspec:
  script: [rspec]
"#,
        "rspec",
    );
    assert_eq!(job.commands, "pwd\nrspec");
}

#[test]
fn job_before_script_replaces_global() {
    let job = effective(
        r#"
before_script: [global arg]
rspec:
  before_script: [local arg]
  script: [rspec]
"#,
        "rspec",
    );
    assert_eq!(job.commands, "local arg\nrspec");
}

#[test]
fn script_alone_without_before_script() {
    let job = effective("rspec:\n  script: [bundle, rspec]\n", "rspec");
    assert_eq!(job.commands, "bundle\nrspec");
}

#[test]
fn after_script_stays_out_of_commands() {
    let job = effective(
        r#"
after_script: [cleanup]
rspec:
  script: [rspec]
"#,
        "rspec",
    );
    assert_eq!(job.commands, "rspec");
    assert_eq!(job.after_script, Some(vec!["cleanup".to_string()]));
}

#[test]
fn image_and_services_fall_back_to_global() {
    let yaml = r#"
image: ruby:2.7
services: [mysql]
rspec:
  script: [rspec]
spinach:
  image: ruby:3.2
  services: [postgresql, "docker:dind"]
  script: [spinach]
"#;
    let rspec = effective(yaml, "rspec");
    assert_eq!(rspec.image.as_deref(), Some("ruby:2.7"));
    assert_eq!(rspec.services, Some(vec!["mysql".to_string()]));

    let spinach = effective(yaml, "spinach");
    assert_eq!(spinach.image.as_deref(), Some("ruby:3.2"));
    assert_eq!(
        spinach.services,
        Some(vec!["postgresql".to_string(), "docker:dind".to_string()])
    );
}

#[test]
fn job_cache_replaces_global_cache() {
    let job = effective(
        r#"
cache:
  key: global
  paths: [logs/, binaries/]
  untracked: true
rspec:
  script: [rspec]
  cache:
    key: local
    paths: [test/]
"#,
        "rspec",
    );
    assert_eq!(
        job.cache,
        Some(CacheConfig {
            key: Some("local".to_string()),
            paths: Some(vec!["test/".to_string()]),
            untracked: None,
            policy: None,
        })
    );
}

#[test]
fn job_artifacts_replace_default_artifacts() {
    let job = effective(
        r#"
default:
  artifacts:
    paths: [coverage/]
    expire_in: 1week
rspec:
  script: [rspec]
  artifacts:
    name: report
"#,
        "rspec",
    );
    let artifacts = job.artifacts.unwrap();
    assert_eq!(artifacts.name.as_deref(), Some("report"));
    assert_eq!(artifacts.paths, None);
    assert_eq!(artifacts.expire_in, None);
}

#[test]
fn job_variables_override_global_in_job_order() {
    let job = effective(
        r#"
variables:
  VAR1: a
rspec:
  script: [rspec]
  variables:
    VAR1: b
    VAR2: c
"#,
        "rspec",
    );
    assert_eq!(job.variables, pairs(&[("VAR1", "b"), ("VAR2", "c")]));
}

#[test]
fn global_only_variables_come_first() {
    let mut global = Variables::new();
    global.insert("A".to_string(), "1".to_string());
    global.insert("B".to_string(), "2".to_string());
    let mut job = Variables::new();
    job.insert("C".to_string(), "3".to_string());
    job.insert("A".to_string(), "x".to_string());

    assert_eq!(
        resolve_variables(&global, Some(&job)),
        pairs(&[("B", "2"), ("C", "3"), ("A", "x")])
    );
    assert_eq!(
        resolve_variables(&global, None),
        pairs(&[("A", "1"), ("B", "2")])
    );
}

#[test]
fn default_tags_apply_unless_job_declares_tags() {
    let yaml = r#"
default:
  tags: [docker]
rspec:
  script: [rspec]
spinach:
  script: [spinach]
  tags: [ruby, mysql]
"#;
    assert_eq!(effective(yaml, "rspec").tags, vec!["docker".to_string()]);
    assert_eq!(
        effective(yaml, "spinach").tags,
        vec!["ruby".to_string(), "mysql".to_string()]
    );
}

#[test]
fn resolve_prefers_job_value() {
    assert_eq!(resolve(&Some(1), &Some(2)), Some(1));
    assert_eq!(resolve(&None, &Some(2)), Some(2));
    assert_eq!(resolve::<i32>(&None, &None), None);
}
