// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::types::When;
use yare::parameterized;

fn job(only: Option<&[&str]>, except: Option<&[&str]>) -> JobDefinition {
    JobDefinition {
        name: "rspec".to_string(),
        script: vec!["rspec".to_string()],
        stage: "test".to_string(),
        stage_idx: 1,
        before_script: None,
        after_script: None,
        image: None,
        services: None,
        tags: None,
        only: only.map(|tokens| RefRules::parse(tokens.iter().copied()).unwrap()),
        except: except.map(|tokens| RefRules::parse(tokens.iter().copied()).unwrap()),
        variables: None,
        when: When::OnSuccess,
        allow_failure: false,
        environment: None,
        coverage: None,
        dependencies: Vec::new(),
        cache: None,
        artifacts: None,
    }
}

fn branch(name: &str) -> CompileContext {
    CompileContext::new(name)
}

fn tag(name: &str) -> CompileContext {
    CompileContext::new(name).with_tag(true)
}

#[test]
fn no_rules_includes_every_ref() {
    let job = job(None, None);
    assert!(included(&job, &branch("master")));
    assert!(included(&job, &tag("v1.0")));
    assert!(included(&job, &branch("feature/x").with_trigger(true)));
}

#[test]
fn empty_lists_place_no_restriction() {
    let empty_only = job(Some(&[]), None);
    assert!(included(&empty_only, &branch("master")));
    assert!(included(&empty_only, &tag("v1.0")));

    let empty_except = job(None, Some(&[]));
    assert!(included(&empty_except, &branch("master")));

    let both = job(Some(&[]), Some(&["master"]));
    assert!(!included(&both, &branch("master")));
    assert!(included(&both, &branch("feature")));
}

#[parameterized(
    other_ref = { "master", false },
    same_ref = { "deploy", true },
)]
fn only_ref_name(ref_name: &str, expected: bool) {
    let job = job(Some(&["deploy"]), None);
    assert_eq!(included(&job, &branch(ref_name)), expected);
}

#[parameterized(
    excluded_ref = { "master", false },
    other_ref = { "feature", true },
)]
fn except_ref_name(ref_name: &str, expected: bool) {
    let job = job(None, Some(&["master"]));
    assert_eq!(included(&job, &branch(ref_name)), expected);
}

#[test]
fn only_branches_and_tags_keywords() {
    let branches = job(Some(&["branches"]), None);
    assert!(included(&branches, &branch("master")));
    assert!(!included(&branches, &tag("v1.0")));

    let tags = job(Some(&["tags"]), None);
    assert!(!included(&tags, &branch("master")));
    assert!(included(&tags, &tag("v1.0")));
}

#[test]
fn only_triggers_requires_trigger() {
    let job = job(Some(&["triggers"]), None);
    assert!(!included(&job, &branch("master")));
    assert!(included(&job, &branch("master").with_trigger(true)));
}

#[test]
fn only_regex_searches_ref() {
    let job = job(Some(&["/^release-/"]), None);
    assert!(included(&job, &branch("release-1.2")));
    assert!(!included(&job, &branch("pre-release-1.2")));

    let unanchored = self::job(Some(&["/fix/"]), None);
    assert!(included(&unanchored, &branch("hotfix-123")));
}

#[parameterized(
    same_repository_branch = { false, Some("group/project"), true },
    other_repository = { false, Some("fork/project"), false },
    no_repository = { false, None, false },
    tag_in_repository = { true, Some("group/project"), false },
)]
fn only_branches_at_path(is_tag: bool, repository: Option<&str>, expected: bool) {
    let job = job(Some(&["branches@group/project"]), None);
    let mut ctx = CompileContext::new("master").with_tag(is_tag);
    if let Some(path) = repository {
        ctx = ctx.with_repository_path(path);
    }
    assert_eq!(included(&job, &ctx), expected);
}

#[test]
fn except_wins_over_only() {
    let job = job(Some(&["branches"]), Some(&["master"]));
    assert!(!included(&job, &branch("master")));
    assert!(included(&job, &branch("develop")));
}

#[test]
fn except_with_path_only_excludes_that_repository() {
    let job = job(None, Some(&["master@group/project"]));
    assert!(!included(
        &job,
        &branch("master").with_repository_path("group/project")
    ));
    assert!(included(
        &job,
        &branch("master").with_repository_path("fork/project")
    ));
}

#[test]
fn regex_token_keeps_at_sign() {
    let token = RuleToken::parse("/^user@host$/").unwrap();
    assert!(matches!(token.pattern(), RefPattern::Regex(_)));
    assert_eq!(token.path(), None);
    assert!(token.matches(&branch("user@host")));
}

#[test]
fn regex_with_path_splits_at_first_at_sign() {
    let token = RuleToken::parse("/^v\\d/@group/project").unwrap();
    assert!(matches!(token.pattern(), RefPattern::Regex(_)));
    assert_eq!(token.path(), Some("group/project"));
    assert_eq!(token.as_str(), "/^v\\d/@group/project");
}

#[test]
fn malformed_regex_fails_to_parse() {
    assert!(RuleToken::parse("/(unclosed/").is_err());
    assert!(RefRules::parse(["master", "/[z-a]/"]).is_err());
}

#[test]
fn single_slash_is_a_ref_name() {
    let token = RuleToken::parse("/").unwrap();
    assert!(matches!(token.pattern(), RefPattern::Name(name) if name == "/"));
}
