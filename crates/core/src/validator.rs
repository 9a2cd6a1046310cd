// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schema validation for pipeline documents.
//!
//! Walks a [`Node`] tree and builds a [`ConfigDocument`], stopping at the
//! first violation. The order is fixed so the same document always reports
//! the same error:
//!
//! 1. root shape
//! 2. global keys (`stages`/`types`, `before_script`, `after_script`,
//!    `image`, `services`, `variables`, `cache`, `default`)
//! 3. jobs in declaration order, keys in [`JOB_KEYS`] order
//! 4. at least one visible job
//! 5. stage membership
//! 6. dependencies

use crate::dependencies::validate_dependencies;
use crate::error::ValidationError;
use crate::rules::{regex_source, RefRules};
use crate::stages::{StageList, DEFAULT_JOB_STAGE};
use crate::tree::{Key, Mapping, Node};
use crate::types::{
    parse_expiry, ArtifactsConfig, ArtifactsWhen, CacheConfig, CachePolicy, ConfigDocument,
    JobDefinition, Variables, When,
};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Top-level keys that are not jobs
pub const GLOBAL_KEYS: &[&str] = &[
    "stages",
    "types",
    "before_script",
    "after_script",
    "image",
    "services",
    "variables",
    "cache",
    "default",
];

/// Keys accepted in a job, in validation order
pub const JOB_KEYS: &[&str] = &[
    "script",
    "stage",
    "type",
    "before_script",
    "after_script",
    "image",
    "services",
    "tags",
    "only",
    "except",
    "variables",
    "when",
    "allow_failure",
    "environment",
    "coverage",
    "dependencies",
    "cache",
    "artifacts",
];

const DEFAULT_KEYS: &[&str] = &[
    "before_script",
    "after_script",
    "image",
    "services",
    "cache",
    "artifacts",
    "tags",
];

const CACHE_KEYS: &[&str] = &["key", "paths", "untracked", "policy"];

const ARTIFACTS_KEYS: &[&str] = &["name", "untracked", "paths", "when", "expire_in"];

const ARRAY_OF_STRINGS: &str = "an array of strings";
const STRING_OR_ARRAY_OF_STRINGS: &str = "a string or an array of strings";
const A_STRING: &str = "a string";
const A_HASH: &str = "a hash";
const BOOLEAN: &str = "a boolean value";

// Letters, digits, '-', '_', '/', '$', '{', '}', '.' and spaces, not
// starting or ending with '/'. Constant pattern, verified by tests.
#[allow(clippy::expect_used)]
static ENVIRONMENT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_\-/${}. ]+$").expect("constant regex pattern is valid")
});

type Result<T> = std::result::Result<T, ValidationError>;

/// Validate a configuration tree into a document.
pub fn validate(tree: &Node) -> Result<ConfigDocument> {
    let root = tree.as_mapping().ok_or(ValidationError::RootNotHash)?;

    let mut document = validate_globals(root)?;

    let mut jobs = IndexMap::new();
    for (key, value) in root.iter() {
        if key.as_str().is_some_and(|k| GLOBAL_KEYS.contains(&k)) {
            continue;
        }
        let name = job_name(key)?;
        if name.starts_with('.') {
            continue;
        }
        let job = validate_job(name, value)?;
        jobs.insert(name.to_string(), job);
    }

    if jobs.is_empty() {
        return Err(ValidationError::NoVisibleJobs);
    }

    for job in jobs.values_mut() {
        job.stage_idx = document.stages.index_of(&job.stage).ok_or_else(|| {
            ValidationError::UndeclaredStage {
                job: job.name.clone(),
                stages: document.stages.names().to_vec(),
            }
        })?;
    }

    validate_dependencies(&jobs)?;

    debug!(
        jobs = jobs.len(),
        stages = document.stages.len(),
        "validated pipeline document"
    );

    document.jobs = jobs;
    Ok(document)
}

// ============================================================================
// Global scope
// ============================================================================

fn validate_globals(root: &Mapping) -> Result<ConfigDocument> {
    let stages = match (root.get("stages"), root.get("types")) {
        (Some(node), _) => Some(string_array(node, "stages")?),
        (None, Some(node)) => Some(string_array(node, "types")?),
        (None, None) => None,
    };

    let before_script = optional(root, "before_script", |n| string_array(n, "before_script"))?;
    let after_script = optional(root, "after_script", |n| string_array(n, "after_script"))?;
    let image = optional(root, "image", |n| string(n, "image"))?;
    let services = optional(root, "services", |n| string_array(n, "services"))?;
    let variables = optional(root, "variables", |n| variables(n, "variables"))?;
    let cache = optional(root, "cache", |n| cache(n, "cache"))?;
    let defaults = optional(root, "default", validate_default)?.unwrap_or_default();

    Ok(ConfigDocument {
        before_script: before_script.or(defaults.before_script),
        after_script: after_script.or(defaults.after_script),
        image: image.or(defaults.image),
        services: services.or(defaults.services),
        stages: stages.map(StageList::new).unwrap_or_default(),
        variables: variables.unwrap_or_default(),
        cache: cache.or(defaults.cache),
        tags: defaults.tags,
        artifacts: defaults.artifacts,
        jobs: IndexMap::new(),
    })
}

/// Keys of the `default:` section
#[derive(Default)]
struct Defaults {
    before_script: Option<Vec<String>>,
    after_script: Option<Vec<String>>,
    image: Option<String>,
    services: Option<Vec<String>>,
    cache: Option<CacheConfig>,
    artifacts: Option<ArtifactsConfig>,
    tags: Option<Vec<String>>,
}

fn validate_default(node: &Node) -> Result<Defaults> {
    let path = "default";
    let map = hash(node, path)?;
    reject_unknown_keys(map, DEFAULT_KEYS, path)?;

    Ok(Defaults {
        before_script: optional(map, "before_script", |n| {
            string_array(n, &child(path, "before_script"))
        })?,
        after_script: optional(map, "after_script", |n| {
            string_array(n, &child(path, "after_script"))
        })?,
        image: optional(map, "image", |n| string(n, &child(path, "image")))?,
        services: optional(map, "services", |n| string_array(n, &child(path, "services")))?,
        cache: optional(map, "cache", |n| cache(n, &child(path, "cache")))?,
        artifacts: optional(map, "artifacts", |n| artifacts(n, &child(path, "artifacts")))?,
        tags: optional(map, "tags", |n| tags(n, path))?,
    })
}

// ============================================================================
// Jobs
// ============================================================================

fn job_name(key: &Key) -> Result<&str> {
    match key {
        Key::Str(name) if name.trim().is_empty() => Err(ValidationError::BlankJobName),
        Key::Str(name) => Ok(name),
        Key::Null => Err(ValidationError::BlankJobName),
        Key::Scalar(rendered) => Err(ValidationError::JobNameNotSymbol(rendered.clone())),
    }
}

fn validate_job(name: &str, node: &Node) -> Result<JobDefinition> {
    let map = node
        .as_mapping()
        .ok_or_else(|| ValidationError::JobNotHash(name.to_string()))?;
    let path = format!("jobs:{}", name);
    reject_unknown_keys(map, JOB_KEYS, &path)?;

    let script = optional(map, "script", |n| script(n, &child(&path, "script")))?;
    let stage = match (map.get("stage"), map.get("type")) {
        (Some(node), _) => Some(string(node, &child(&path, "stage"))?),
        (None, Some(node)) => Some(string(node, &child(&path, "type"))?),
        (None, None) => None,
    };
    let before_script = optional(map, "before_script", |n| {
        string_array(n, &child(&path, "before_script"))
    })?;
    let after_script = optional(map, "after_script", |n| {
        string_array(n, &child(&path, "after_script"))
    })?;
    let image = optional(map, "image", |n| string(n, &child(&path, "image")))?;
    let services = optional(map, "services", |n| string_array(n, &child(&path, "services")))?;
    let tags = optional(map, "tags", |n| tags(n, &path))?;
    let only = optional(map, "only", |n| ref_rules(n, &child(&path, "only")))?;
    let except = optional(map, "except", |n| ref_rules(n, &child(&path, "except")))?;
    let variables = optional(map, "variables", |n| variables(n, &child(&path, "variables")))?;
    let when = optional(map, "when", |n| when(n, &path))?.unwrap_or_default();
    let allow_failure = optional(map, "allow_failure", |n| {
        n.as_bool().ok_or_else(|| attribute(&path, "allow failure", BOOLEAN))
    })?
    .unwrap_or(false);
    let environment = optional(map, "environment", |n| environment(n, name, &path))?;
    let coverage = optional(map, "coverage", |n| coverage(n, &child(&path, "coverage")))?;
    let dependencies = optional(map, "dependencies", |n| {
        n.as_string_sequence()
            .ok_or_else(|| attribute(&path, "dependencies", ARRAY_OF_STRINGS))
    })?
    .unwrap_or_default();
    let cache = optional(map, "cache", |n| cache(n, &child(&path, "cache")))?;
    let artifacts = optional(map, "artifacts", |n| artifacts(n, &child(&path, "artifacts")))?;

    let script = script
        .filter(|lines| lines.iter().any(|line| !line.trim().is_empty()))
        .ok_or_else(|| ValidationError::MissingScript(name.to_string()))?;

    Ok(JobDefinition {
        name: name.to_string(),
        script,
        stage: stage.unwrap_or_else(|| DEFAULT_JOB_STAGE.to_string()),
        stage_idx: 0,
        before_script,
        after_script,
        image,
        services,
        tags,
        only,
        except,
        variables,
        when,
        allow_failure,
        environment,
        coverage,
        dependencies,
        cache,
        artifacts,
    })
}

fn script(node: &Node, path: &str) -> Result<Vec<String>> {
    match node {
        Node::String(line) => Ok(vec![line.clone()]),
        _ => node
            .as_string_sequence()
            .ok_or_else(|| invalid(path, STRING_OR_ARRAY_OF_STRINGS)),
    }
}

fn tags(node: &Node, path: &str) -> Result<Vec<String>> {
    node.as_string_sequence()
        .ok_or_else(|| attribute(path, "tags", ARRAY_OF_STRINGS))
}

fn when(node: &Node, path: &str) -> Result<When> {
    node.as_str()
        .and_then(When::from_name)
        .ok_or_else(|| attribute(path, "when", "on_success, on_failure, always or manual"))
}

fn environment(node: &Node, name: &str, path: &str) -> Result<String> {
    let environment = node
        .as_str()
        .ok_or_else(|| invalid(&child(path, "environment"), A_STRING))?;
    let valid = ENVIRONMENT_NAME.is_match(environment)
        && !environment.starts_with('/')
        && !environment.ends_with('/');
    if valid {
        Ok(environment.to_string())
    } else {
        Err(ValidationError::InvalidEnvironmentName(name.to_string()))
    }
}

fn coverage(node: &Node, path: &str) -> Result<String> {
    node.as_str()
        .and_then(regex_source)
        .filter(|source| Regex::new(source).is_ok())
        .map(String::from)
        .ok_or_else(|| invalid(path, "a regular expression"))
}

/// `only`/`except`: a string, a `/regex/`, or a list of those
fn ref_rules(node: &Node, path: &str) -> Result<RefRules> {
    let tokens = match node {
        Node::String(token) => vec![token.clone()],
        _ => node
            .as_string_sequence()
            .ok_or_else(|| invalid(path, "an array of strings or regexps"))?,
    };
    RefRules::parse(tokens.iter().map(String::as_str))
        .map_err(|_| invalid(path, "an array of strings or regexps"))
}

// ============================================================================
// Shared sub-objects
// ============================================================================

fn variables(node: &Node, path: &str) -> Result<Variables> {
    let map = node
        .as_mapping()
        .ok_or_else(|| invalid(path, "a hash of key value pairs"))?;

    map.iter()
        .map(|(key, value)| {
            let key = key.as_str().map(String::from);
            let value = match value {
                Node::String(_) | Node::Integer(_) | Node::Float(_) => value.scalar_text(),
                _ => None,
            };
            key.zip(value)
                .ok_or_else(|| invalid(path, "a hash of key value pairs"))
        })
        .collect()
}

fn cache(node: &Node, path: &str) -> Result<CacheConfig> {
    let map = hash(node, path)?;
    reject_unknown_keys(map, CACHE_KEYS, path)?;

    Ok(CacheConfig {
        key: optional(map, "key", |n| {
            n.as_str()
                .map(String::from)
                .ok_or_else(|| invalid(&child(path, "key"), "a string or symbol"))
        })?,
        paths: optional(map, "paths", |n| string_array(n, &child(path, "paths")))?,
        untracked: optional(map, "untracked", |n| {
            n.as_bool()
                .ok_or_else(|| invalid(&child(path, "untracked"), BOOLEAN))
        })?,
        policy: optional(map, "policy", |n| {
            n.as_str()
                .and_then(CachePolicy::from_name)
                .ok_or_else(|| invalid(&child(path, "policy"), "pull-push, pull or push"))
        })?,
    })
}

fn artifacts(node: &Node, path: &str) -> Result<ArtifactsConfig> {
    let map = hash(node, path)?;
    reject_unknown_keys(map, ARTIFACTS_KEYS, path)?;

    Ok(ArtifactsConfig {
        name: optional(map, "name", |n| {
            n.as_str()
                .map(String::from)
                .ok_or_else(|| attribute(path, "name", A_STRING))
        })?,
        untracked: optional(map, "untracked", |n| {
            n.as_bool()
                .ok_or_else(|| attribute(path, "untracked", BOOLEAN))
        })?,
        paths: optional(map, "paths", |n| string_array(n, &child(path, "paths")))?,
        when: optional(map, "when", |n| {
            n.as_str()
                .and_then(ArtifactsWhen::from_name)
                .ok_or_else(|| attribute(path, "when", "on_success, on_failure or always"))
        })?,
        expire_in: optional(map, "expire_in", |n| {
            let text = match n {
                Node::Integer(secs) => Some(secs.to_string()),
                _ => n.as_str().map(String::from),
            };
            text.filter(|text| parse_expiry(text).is_some())
                .ok_or_else(|| attribute(path, "expire in", "a duration"))
        })?,
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Run `f` on the value of `key` when present
fn optional<T>(map: &Mapping, key: &str, f: impl FnOnce(&Node) -> Result<T>) -> Result<Option<T>> {
    map.get(key).map(f).transpose()
}

fn child(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}:{}", path, key)
    }
}

fn invalid(path: &str, expected: &'static str) -> ValidationError {
    ValidationError::InvalidConfig {
        path: path.to_string(),
        expected,
    }
}

fn attribute(path: &str, attribute: &'static str, expected: &'static str) -> ValidationError {
    ValidationError::InvalidAttribute {
        path: path.to_string(),
        attribute,
        expected,
    }
}

fn string(node: &Node, path: &str) -> Result<String> {
    node.as_str()
        .map(String::from)
        .ok_or_else(|| invalid(path, A_STRING))
}

fn string_array(node: &Node, path: &str) -> Result<Vec<String>> {
    node.as_string_sequence()
        .ok_or_else(|| invalid(path, ARRAY_OF_STRINGS))
}

fn hash<'a>(node: &'a Node, path: &str) -> Result<&'a Mapping> {
    node.as_mapping().ok_or_else(|| invalid(path, A_HASH))
}

fn reject_unknown_keys(map: &Mapping, allowed: &[&str], path: &str) -> Result<()> {
    let unknown: Vec<String> = map
        .keys()
        .filter(|key| !key.as_str().is_some_and(|k| allowed.contains(&k)))
        .map(|key| key.to_string())
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::UnknownKeys {
            path: path.to_string(),
            keys: unknown,
        })
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
