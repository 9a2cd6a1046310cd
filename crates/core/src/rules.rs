// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `only`/`except` ref rules.
//!
//! Tokens are parsed once, while the document is validated, so regexes are
//! compiled a single time and filtering never fails.
//!
//! Token forms:
//! - `master` - the ref name itself
//! - `branches`, `tags`, `triggers` - keywords matching the kind of pipeline
//! - `/^release-.*$/` - a regex searched in the ref name
//! - `<pattern>@<path>` - any of the above, restricted to one repository

use crate::compiler::CompileContext;
use crate::types::JobDefinition;
use regex::Regex;

/// What a rule token matches against
#[derive(Debug, Clone)]
pub enum RefPattern {
    Branches,
    Tags,
    Triggers,
    Name(String),
    Regex(Regex),
}

impl RefPattern {
    fn parse(pattern: &str) -> Result<Self, regex::Error> {
        if let Some(source) = regex_source(pattern) {
            return Regex::new(source).map(RefPattern::Regex);
        }
        Ok(match pattern {
            "branches" => RefPattern::Branches,
            "tags" => RefPattern::Tags,
            "triggers" => RefPattern::Triggers,
            name => RefPattern::Name(name.to_string()),
        })
    }

    fn matches(&self, ctx: &CompileContext) -> bool {
        match self {
            RefPattern::Branches => !ctx.is_tag,
            RefPattern::Tags => ctx.is_tag,
            RefPattern::Triggers => ctx.has_trigger,
            RefPattern::Name(name) => ctx.ref_name == *name,
            RefPattern::Regex(regex) => regex.is_match(&ctx.ref_name),
        }
    }
}

/// The body of a `/regex/` token, if the text is one
pub fn regex_source(text: &str) -> Option<&str> {
    if text.len() >= 2 && text.starts_with('/') && text.ends_with('/') {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

/// One entry of an `only`/`except` list
#[derive(Debug, Clone)]
pub struct RuleToken {
    source: String,
    pattern: RefPattern,
    path: Option<String>,
}

impl RuleToken {
    /// Parse a token.
    ///
    /// A whole `/regex/` token never carries a path; otherwise the text is
    /// split at the first `@`.
    pub fn parse(token: &str) -> Result<Self, regex::Error> {
        let (pattern, path) = match token.split_once('@') {
            Some((pattern, path)) if regex_source(token).is_none() => {
                (pattern, Some(path.to_string()))
            }
            _ => (token, None),
        };

        Ok(Self {
            source: token.to_string(),
            pattern: RefPattern::parse(pattern)?,
            path,
        })
    }

    pub fn matches(&self, ctx: &CompileContext) -> bool {
        if let Some(path) = &self.path {
            if ctx.repository_path.as_deref() != Some(path.as_str()) {
                return false;
            }
        }
        self.pattern.matches(ctx)
    }

    /// The token as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn pattern(&self) -> &RefPattern {
        &self.pattern
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}

/// A parsed `only` or `except` list
#[derive(Debug, Clone, Default)]
pub struct RefRules {
    tokens: Vec<RuleToken>,
}

impl RefRules {
    pub fn new(tokens: Vec<RuleToken>) -> Self {
        Self { tokens }
    }

    /// Parse every token, failing on the first malformed regex
    pub fn parse<'a>(tokens: impl IntoIterator<Item = &'a str>) -> Result<Self, regex::Error> {
        tokens
            .into_iter()
            .map(RuleToken::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn matches_any(&self, ctx: &CompileContext) -> bool {
        self.tokens.iter().any(|token| token.matches(ctx))
    }

    pub fn tokens(&self) -> &[RuleToken] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Whether a job takes part in a pipeline for `ctx`.
///
/// Without `only` (or with an empty one) every ref is included; `except`
/// excludes on any match.
pub fn included(job: &JobDefinition, ctx: &CompileContext) -> bool {
    let only = job
        .only
        .as_ref()
        .filter(|rules| !rules.is_empty())
        .map_or(true, |rules| rules.matches_any(ctx));
    let except = job
        .except
        .as_ref()
        .is_some_and(|rules| rules.matches_any(ctx));
    only && !except
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
