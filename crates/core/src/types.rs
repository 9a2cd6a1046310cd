// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validated pipeline document types.
//!
//! These are produced only by the validator. Once built they are never
//! mutated, so a document can be shared across threads and compiled for
//! any number of refs.

use crate::rules::RefRules;
use crate::stages::StageList;
use indexmap::IndexMap;
use serde::Serialize;
use std::time::Duration;

/// Ordered variable definitions
pub type Variables = IndexMap<String, String>;

/// When a job runs relative to earlier stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum When {
    #[default]
    OnSuccess,
    OnFailure,
    Always,
    Manual,
}

impl When {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "on_success" => Some(When::OnSuccess),
            "on_failure" => Some(When::OnFailure),
            "always" => Some(When::Always),
            "manual" => Some(When::Manual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            When::OnSuccess => "on_success",
            When::OnFailure => "on_failure",
            When::Always => "always",
            When::Manual => "manual",
        }
    }
}

/// When artifacts are uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactsWhen {
    #[default]
    OnSuccess,
    OnFailure,
    Always,
}

impl ArtifactsWhen {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "on_success" => Some(ArtifactsWhen::OnSuccess),
            "on_failure" => Some(ArtifactsWhen::OnFailure),
            "always" => Some(ArtifactsWhen::Always),
            _ => None,
        }
    }
}

/// Whether a cache is downloaded, uploaded, or both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    #[default]
    PullPush,
    Pull,
    Push,
}

impl CachePolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pull-push" => Some(CachePolicy::PullPush),
            "pull" => Some(CachePolicy::Pull),
            "push" => Some(CachePolicy::Push),
            _ => None,
        }
    }
}

/// Cache definition, global or per job
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub untracked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<CachePolicy>,
}

/// Artifacts definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtifactsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub untracked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<ArtifactsWhen>,
    /// Expiry as written by the author (`"1week"`, `"never"`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_in: Option<String>,
}

/// Parse an artifact expiry.
///
/// Returns `Some(None)` for `never`, `Some(Some(d))` for a duration and
/// `None` when the text is not a duration at all.
///
/// A bare integer is a number of seconds. Connective `and`, trailing
/// commas and the `mos`/`yrs` abbreviations are accepted alongside the
/// units `humantime` knows.
pub fn parse_expiry(text: &str) -> Option<Option<Duration>> {
    let text = text.trim();
    if text == "never" {
        return Some(None);
    }
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().ok().map(|secs| Some(Duration::from_secs(secs)));
    }
    let normalized = text
        .split_whitespace()
        .map(|word| word.trim_end_matches(','))
        .filter(|word| !word.is_empty() && !word.eq_ignore_ascii_case("and"))
        .map(expand_unit)
        .collect::<Vec<_>>()
        .join(" ");
    humantime::parse_duration(&normalized).ok().map(Some)
}

fn expand_unit(word: &str) -> String {
    const ABBREVIATIONS: &[(&str, &str)] = &[
        ("mos", "months"),
        ("mo", "month"),
        ("yrs", "years"),
        ("yr", "year"),
    ];
    ABBREVIATIONS
        .iter()
        .find_map(|(short, long)| {
            word.strip_suffix(short)
                .filter(|count| count.is_empty() || count.bytes().all(|b| b.is_ascii_digit()))
                .map(|count| format!("{count}{long}"))
        })
        .unwrap_or_else(|| word.to_string())
}

/// One job of a validated document
#[derive(Debug, Clone)]
pub struct JobDefinition {
    pub name: String,
    pub script: Vec<String>,
    pub stage: String,
    /// Position of `stage` in the document's stage list
    pub stage_idx: usize,
    pub before_script: Option<Vec<String>>,
    pub after_script: Option<Vec<String>>,
    pub image: Option<String>,
    pub services: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub only: Option<RefRules>,
    pub except: Option<RefRules>,
    pub variables: Option<Variables>,
    pub when: When,
    pub allow_failure: bool,
    pub environment: Option<String>,
    /// Coverage regex source, without the surrounding slashes
    pub coverage: Option<String>,
    pub dependencies: Vec<String>,
    pub cache: Option<CacheConfig>,
    pub artifacts: Option<ArtifactsConfig>,
}

/// A validated pipeline document.
///
/// Global fields already fold in the `default:` section; top-level keys
/// win over it.
#[derive(Debug, Clone, Default)]
pub struct ConfigDocument {
    pub before_script: Option<Vec<String>>,
    pub after_script: Option<Vec<String>>,
    pub image: Option<String>,
    pub services: Option<Vec<String>>,
    pub stages: StageList,
    pub variables: Variables,
    pub cache: Option<CacheConfig>,
    /// Default tags from the `default:` section
    pub tags: Option<Vec<String>>,
    /// Default artifacts from the `default:` section
    pub artifacts: Option<ArtifactsConfig>,
    /// Visible jobs in declaration order
    pub jobs: IndexMap<String, JobDefinition>,
}

impl ConfigDocument {
    pub fn job(&self, name: &str) -> Option<&JobDefinition> {
        self.jobs.get(name)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
