//! Shared result model used across checkaccess.
//! Includes `Impact`, `Issue`, `AuditFailure`, `AuditResult`, `SeverityTally`
//! and the per-invocation aggregate `BatchRun`.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// Severity classification of an accessibility issue.
///
/// Ordering follows severity, most severe first, so tallies iterate
/// critical → serious → moderate → minor → unknown.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
#[serde(from = "Option<String>", into = "String")]
pub enum Impact {
    Critical,
    Serious,
    Moderate,
    Minor,
    #[default]
    Unknown,
}

impl Impact {
    /// Map a raw impact label onto the known tiers; anything else is `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "critical" => Impact::Critical,
            "serious" => Impact::Serious,
            "moderate" => Impact::Moderate,
            "minor" => Impact::Minor,
            _ => Impact::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Critical => "critical",
            Impact::Serious => "serious",
            Impact::Moderate => "moderate",
            Impact::Minor => "minor",
            Impact::Unknown => "unknown",
        }
    }
}

impl From<Option<String>> for Impact {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map_or(Impact::Unknown, Impact::parse)
    }
}

impl From<Impact> for String {
    fn from(impact: Impact) -> Self {
        impact.as_str().to_string()
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One accessibility violation as reported by the rule engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub impact: Impact,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Issue {
    pub fn new(
        description: impl Into<String>,
        help: impl Into<String>,
        impact: Impact,
        tags: Vec<String>,
    ) -> Self {
        Self {
            description: description.into(),
            help: help.into(),
            impact,
            tags,
        }
    }

    pub fn joined_tags(&self) -> String {
        self.tags.join(", ")
    }
}

/// Why a single URL could not be audited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditFailure {
    /// The input could not be turned into a URL.
    InvalidUrl { message: String },
    /// Navigation threw or timed out.
    Navigation { message: String },
    /// The page answered with a non-success status (`None` when unknown).
    BadStatus { code: Option<u16> },
    /// Injecting or running the rule engine failed.
    RuleEngine { message: String },
}

impl std::fmt::Display for AuditFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditFailure::InvalidUrl { message } => write!(f, "Invalid URL: {}", message),
            AuditFailure::Navigation { message } => write!(f, "{}", message),
            AuditFailure::BadStatus { code: Some(code) } => write!(f, "Bad response: {}", code),
            AuditFailure::BadStatus { code: None } => write!(f, "Bad response: Unknown"),
            AuditFailure::RuleEngine { message } => write!(f, "Rule engine failed: {}", message),
        }
    }
}

/// Outcome of auditing one URL. Built once per URL and never mutated.
#[derive(Debug, Clone)]
pub struct AuditResult {
    /// The input exactly as the operator supplied it.
    pub url: String,
    /// Parsed URL with the scheme defaulted to http; `None` only for invalid input.
    pub normalized_url: Option<Url>,
    /// `{first-host-label}-report-{timestamp}.pdf`, offered in interactive mode.
    pub suggested_filename: Option<String>,
    pub issues: Vec<Issue>,
    pub error: Option<AuditFailure>,
}

impl AuditResult {
    pub fn completed(
        url: impl Into<String>,
        normalized_url: Url,
        suggested_filename: String,
        issues: Vec<Issue>,
    ) -> Self {
        Self {
            url: url.into(),
            normalized_url: Some(normalized_url),
            suggested_filename: Some(suggested_filename),
            issues,
            error: None,
        }
    }

    pub fn failed(
        url: impl Into<String>,
        normalized_url: Option<Url>,
        suggested_filename: Option<String>,
        failure: AuditFailure,
    ) -> Self {
        Self {
            url: url.into(),
            normalized_url,
            suggested_filename,
            issues: Vec::new(),
            error: Some(failure),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn has_issues(&self) -> bool {
        self.error.is_none() && !self.issues.is_empty()
    }

    /// Errors and non-empty issue lists both count as failures for the batch.
    pub fn is_failure(&self) -> bool {
        self.is_error() || self.has_issues()
    }

    /// Normalised URL as text, or the raw input when it could not be parsed.
    pub fn display_url(&self) -> &str {
        self.normalized_url
            .as_ref()
            .map(Url::as_str)
            .unwrap_or(&self.url)
    }

    pub fn tally(&self) -> SeverityTally {
        SeverityTally::from_issues(&self.issues)
    }
}

/// Count of issues per impact tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeverityTally(BTreeMap<Impact, usize>);

impl SeverityTally {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut counts = BTreeMap::new();
        for issue in issues {
            *counts.entry(issue.impact).or_insert(0) += 1;
        }
        Self(counts)
    }

    pub fn get(&self, impact: Impact) -> usize {
        self.0.get(&impact).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate in severity order, skipping tiers with no issues.
    pub fn iter(&self) -> impl Iterator<Item = (Impact, usize)> + '_ {
        self.0.iter().map(|(impact, count)| (*impact, *count))
    }
}

/// Aggregate of one invocation.
#[derive(Debug, Clone, Default)]
pub struct BatchRun {
    pub results: Vec<AuditResult>,
    pub has_failures: bool,
}

impl BatchRun {
    pub fn record(&mut self, result: AuditResult) {
        self.has_failures |= result.is_failure();
        self.results.push(result);
    }

    /// Findings only fail the process in CI mode.
    pub fn exit_code(&self, ci: bool) -> u8 {
        if ci && self.has_failures { 1 } else { 0 }
    }
}
