//! Audit of a single URL: normalise the input, open a fresh page, navigate
//! within the timeout, inject the rule engine and collect its violations.
//!
//! Navigation and rule-engine problems never escape as errors. They are
//! recorded on the returned `AuditResult` so a batch can carry on.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::io::browser::PageDriver;
use crate::types::{AuditFailure, AuditResult, Issue};

/// Source of the in-page accessibility engine (axe-core).
#[derive(Debug, Clone)]
pub struct RuleEngineScript {
    source: String,
}

impl RuleEngineScript {
    /// Read the engine bundle; a missing bundle is a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!(
                "cannot read rule engine script {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!("Loaded rule engine ({} bytes) from {:?}", source.len(), path);
        Ok(Self { source })
    }

    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[derive(Debug, Deserialize)]
struct RawEngineResults {
    #[serde(default)]
    violations: Vec<Issue>,
}

/// Parse operator input, defaulting the scheme to `http://`.
pub fn normalize_url(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };
    Url::parse(&candidate).map_err(|source| Error::InvalidUrl {
        input: input.to_string(),
        source,
    })
}

// only a well-formed scheme before the first `://` counts; `://` inside a
// path or query string does not
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn host_without_www(url: &Url) -> Option<&str> {
    url.host_str()
        .map(|host| host.strip_prefix("www.").unwrap_or(host))
        .filter(|host| !host.is_empty())
}

/// `{first-host-label}-report-{YYYY-MM-DDTHH-MM-SS}.pdf`, offered as the
/// default name in interactive mode.
pub fn suggested_filename(url: &Url, now: DateTime<Utc>) -> String {
    let label = host_without_www(url)
        .and_then(|host| host.split('.').next())
        .unwrap_or("report");
    format!("{}-report-{}.pdf", label, now.format("%Y-%m-%dT%H-%M-%S"))
}

/// `{hostname-without-www}-report.pdf`, used unconditionally in CI mode.
pub fn ci_filename(url: &Url) -> String {
    format!("{}-report.pdf", host_without_www(url).unwrap_or("site"))
}

/// Trim and make sure the name ends in `.pdf` (suffix check is case-insensitive).
pub fn normalize_pdf_filename(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    if trimmed.to_ascii_lowercase().ends_with(".pdf") {
        PathBuf::from(trimmed)
    } else {
        PathBuf::from(format!("{}.pdf", trimmed))
    }
}

/// Audit `input` once. Returns `Err` only when the input is not a URL.
pub fn run_audit(
    driver: &dyn PageDriver,
    engine: &RuleEngineScript,
    input: &str,
    timeout: Duration,
) -> Result<AuditResult> {
    let url = normalize_url(input)?;
    let suggested = suggested_filename(&url, Utc::now());
    info!("Auditing {}", url);

    let failed = |failure: AuditFailure| {
        warn!("Audit of {} failed: {}", url, failure);
        AuditResult::failed(input, Some(url.clone()), Some(suggested.clone()), failure)
    };

    // the page lives until the end of this function on every path
    let mut page = match driver.open_page() {
        Ok(page) => page,
        Err(e) => {
            return Ok(failed(AuditFailure::Navigation {
                message: plain_message(e),
            }));
        }
    };

    let status = match page.navigate(&url, timeout) {
        Ok(status) => status,
        Err(e) => {
            return Ok(failed(AuditFailure::Navigation {
                message: plain_message(e),
            }));
        }
    };
    debug!("{} answered with status {}", url, status);
    if !(200..300).contains(&status) {
        let code = (status != 0).then_some(status);
        return Ok(failed(AuditFailure::BadStatus { code }));
    }

    let raw = page
        .inject_script(engine.source())
        .and_then(|()| page.run_rule_engine())
        .and_then(|value| Ok(serde_json::from_value::<RawEngineResults>(value)?));
    let issues = match raw {
        Ok(results) => results.violations,
        Err(e) => {
            return Ok(failed(AuditFailure::RuleEngine {
                message: plain_message(e),
            }));
        }
    };

    info!("{} produced {} violations", url, issues.len());
    Ok(AuditResult::completed(input, url, suggested, issues))
}

/// Like [`run_audit`], but an unparseable input becomes a failed result too,
/// so callers walking a list never have to stop.
pub fn audit_or_record(
    driver: &dyn PageDriver,
    engine: &RuleEngineScript,
    input: &str,
    timeout: Duration,
) -> AuditResult {
    run_audit(driver, engine, input, timeout).unwrap_or_else(|e| {
        warn!("Skipping {}: {}", input, e);
        let message = match e {
            Error::InvalidUrl { source, .. } => source.to_string(),
            other => other.to_string(),
        };
        AuditResult::failed(input, None, None, AuditFailure::InvalidUrl { message })
    })
}

// collaborator errors carry their own context; drop our variant prefix
fn plain_message(e: Error) -> String {
    match e {
        Error::Navigation(message) | Error::RuleEngine(message) | Error::External(message) => {
            message
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::browser::AuditPage;
    use chrono::TimeZone;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    enum Behaviour {
        Ok(u16, serde_json::Value),
        NavigationError(&'static str),
        EngineError(&'static str),
        LaunchError,
    }

    struct FakeDriver {
        behaviour: Behaviour,
        open: Rc<Cell<i32>>,
    }

    struct FakePage {
        behaviour: Behaviour,
        open: Rc<Cell<i32>>,
    }

    impl Drop for FakePage {
        fn drop(&mut self) {
            self.open.set(self.open.get() - 1);
        }
    }

    impl PageDriver for FakeDriver {
        fn open_page(&self) -> Result<Box<dyn AuditPage>> {
            if matches!(self.behaviour, Behaviour::LaunchError) {
                return Err(Error::Navigation("cannot launch browser".into()));
            }
            self.open.set(self.open.get() + 1);
            Ok(Box::new(FakePage {
                behaviour: self.behaviour.clone(),
                open: Rc::clone(&self.open),
            }))
        }
    }

    impl AuditPage for FakePage {
        fn navigate(&mut self, _url: &Url, _timeout: Duration) -> Result<u16> {
            match &self.behaviour {
                Behaviour::Ok(status, _) => Ok(*status),
                Behaviour::NavigationError(message) => Err(Error::Navigation(message.to_string())),
                _ => Ok(200),
            }
        }

        fn inject_script(&mut self, source: &str) -> Result<()> {
            assert_eq!(source, "window.axe = {};");
            Ok(())
        }

        fn run_rule_engine(&mut self) -> Result<serde_json::Value> {
            match &self.behaviour {
                Behaviour::Ok(_, value) => Ok(value.clone()),
                Behaviour::EngineError(message) => Err(Error::RuleEngine(message.to_string())),
                _ => Ok(serde_json::json!({ "violations": [] })),
            }
        }
    }

    fn audit(behaviour: Behaviour, input: &str) -> (Result<AuditResult>, i32) {
        let open = Rc::new(Cell::new(0));
        let driver = FakeDriver {
            behaviour,
            open: Rc::clone(&open),
        };
        let engine = RuleEngineScript::from_source("window.axe = {};");
        let result = run_audit(&driver, &engine, input, Duration::from_secs(15));
        (result, open.get())
    }

    #[test]
    fn normalize_defaults_scheme_to_http() {
        assert_eq!(
            normalize_url("example.com").unwrap().as_str(),
            "http://example.com/"
        );
        assert_eq!(
            normalize_url("https://example.com/a").unwrap().as_str(),
            "https://example.com/a"
        );
        assert_eq!(
            normalize_url("localhost:8080/x").unwrap().as_str(),
            "http://localhost:8080/x"
        );
        assert_eq!(
            normalize_url("httpbin.org").unwrap().as_str(),
            "http://httpbin.org/"
        );
        assert_eq!(
            normalize_url("example.com/login?next=https://example.com/home")
                .unwrap()
                .as_str(),
            "http://example.com/login?next=https://example.com/home"
        );
        assert_eq!(
            normalize_url("example.com/go#to=ftp://files.example")
                .unwrap()
                .host_str(),
            Some("example.com")
        );
        assert_eq!(
            normalize_url("git+ssh://host.example/repo").unwrap().scheme(),
            "git+ssh"
        );
    }

    #[test]
    fn normalize_rejects_garbage() {
        let err = normalize_url("http://exa mple.com").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
        assert!(normalize_url("").is_err());
    }

    #[test]
    fn filenames_derive_from_host() {
        let url = Url::parse("https://www.bad.example/path").unwrap();
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(
            suggested_filename(&url, now),
            "bad-report-2024-03-05T14-07-09.pdf"
        );
        assert_eq!(ci_filename(&url), "bad.example-report.pdf");
    }

    #[test]
    fn pdf_suffix_normalization_is_idempotent() {
        assert_eq!(normalize_pdf_filename("foo.pdf"), PathBuf::from("foo.pdf"));
        assert_eq!(normalize_pdf_filename("foo"), PathBuf::from("foo.pdf"));
        assert_eq!(normalize_pdf_filename("FOO.PDF"), PathBuf::from("FOO.PDF"));
        assert_eq!(normalize_pdf_filename("  out/foo  "), PathBuf::from("out/foo.pdf"));
        let once = normalize_pdf_filename("report");
        let twice = normalize_pdf_filename(once.to_str().unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn successful_audit_maps_violations() {
        let raw = serde_json::json!({
            "violations": [
                { "description": "d1", "help": "h1", "impact": "critical", "tags": ["wcag2a"] },
                { "description": "d2", "help": "h2", "impact": null, "tags": [] }
            ]
        });
        let (result, open) = audit(Behaviour::Ok(200, raw), "good.example");
        let result = result.unwrap();
        assert_eq!(open, 0, "page must be released");
        assert!(result.error.is_none());
        assert_eq!(result.issues.len(), 2);
        assert_eq!(result.issues[1].impact, crate::types::Impact::Unknown);
        assert_eq!(result.url, "good.example");
        assert_eq!(
            result.normalized_url.as_ref().map(Url::as_str),
            Some("http://good.example/")
        );
        assert!(
            result
                .suggested_filename
                .as_deref()
                .unwrap()
                .starts_with("good-report-")
        );
    }

    #[test]
    fn navigation_error_is_recorded_not_thrown() {
        let (result, open) = audit(
            Behaviour::NavigationError("net::ERR_NAME_NOT_RESOLVED"),
            "nowhere.example",
        );
        let result = result.unwrap();
        assert_eq!(open, 0);
        assert!(result.issues.is_empty());
        assert_eq!(
            result.error,
            Some(AuditFailure::Navigation {
                message: "net::ERR_NAME_NOT_RESOLVED".into()
            })
        );
    }

    #[test]
    fn non_success_status_is_a_failure() {
        let (result, open) = audit(
            Behaviour::Ok(404, serde_json::json!({})),
            "missing.example",
        );
        assert_eq!(open, 0);
        assert_eq!(
            result.unwrap().error,
            Some(AuditFailure::BadStatus { code: Some(404) })
        );

        let (unknown, _) = audit(Behaviour::Ok(0, serde_json::json!({})), "odd.example");
        assert_eq!(
            unknown.unwrap().error,
            Some(AuditFailure::BadStatus { code: None })
        );
    }

    #[test]
    fn rule_engine_error_is_recorded() {
        let (result, open) = audit(
            Behaviour::EngineError("axe is not defined"),
            "good.example",
        );
        assert_eq!(open, 0);
        assert_eq!(
            result.unwrap().error,
            Some(AuditFailure::RuleEngine {
                message: "axe is not defined".into()
            })
        );
    }

    #[test]
    fn browser_launch_failure_is_recorded() {
        let (result, _) = audit(Behaviour::LaunchError, "good.example");
        assert!(matches!(
            result.unwrap().error,
            Some(AuditFailure::Navigation { .. })
        ));
    }

    #[test]
    fn invalid_input_fails_fast() {
        let (result, open) = audit(
            Behaviour::Ok(200, serde_json::json!({})),
            "http://exa mple.com",
        );
        assert!(matches!(result, Err(Error::InvalidUrl { .. })));
        assert_eq!(open, 0);
    }

    #[test]
    fn rule_engine_script_load_missing_is_configuration_error() {
        let err = RuleEngineScript::load(Path::new("/definitely/not/axe.min.js")).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
