//! High-level, ergonomic library API: audit one URL or a list of URLs and
//! write a PDF report for a result. Prefer these entrypoints over the
//! `core` modules when embedding checkaccess in another tool.
//!
//! Unlike the CLI, nothing here prints or prompts: results come back as
//! values and the caller decides what to show.
use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::audit::{RuleEngineScript, audit_or_record, run_audit};
use crate::core::params::AuditSettings;
use crate::error::Result;
use crate::io::browser::PageDriver;
use crate::io::locale::Translator;
use crate::io::writers::PdfRenderer;
use crate::report::document::render_document;
use crate::types::{AuditResult, BatchRun};

/// Audit a single URL with an already prepared driver and engine.
pub fn audit_url_with(
    driver: &dyn PageDriver,
    engine: &RuleEngineScript,
    input: &str,
    settings: &AuditSettings,
) -> Result<AuditResult> {
    run_audit(driver, engine, input, settings.navigation_timeout())
}

/// Audit every input in order. Invalid URLs are recorded as failed results
/// rather than aborting the list.
pub fn audit_urls_with(
    driver: &dyn PageDriver,
    engine: &RuleEngineScript,
    inputs: &[String],
    settings: &AuditSettings,
) -> BatchRun {
    let mut batch = BatchRun::default();
    for input in inputs {
        let result = audit_or_record(driver, engine, input, settings.navigation_timeout());
        batch.record(result);
    }
    info!(
        "Audited {} URL(s), failures: {}",
        batch.results.len(),
        batch.has_failures
    );
    batch
}

/// Audit one URL in headless Chrome using the engine script named in
/// `settings`.
#[cfg(feature = "chrome")]
pub fn audit_url(input: &str, settings: &AuditSettings) -> Result<AuditResult> {
    let engine = RuleEngineScript::load(&settings.rule_engine_script)?;
    let driver = crate::io::browser::ChromeDriver::new(settings);
    audit_url_with(&driver, &engine, input, settings)
}

/// Audit a list of URLs in headless Chrome, one after another.
#[cfg(feature = "chrome")]
pub fn audit_urls(inputs: &[String], settings: &AuditSettings) -> Result<BatchRun> {
    let engine = RuleEngineScript::load(&settings.rule_engine_script)?;
    let driver = crate::io::browser::ChromeDriver::new(settings);
    Ok(audit_urls_with(&driver, &engine, inputs, settings))
}

/// Write the PDF report for `result` to `settings.reports_dir/output`
/// using the fonts in `settings.fonts_dir`.
pub fn save_pdf_report(
    result: &AuditResult,
    output: &Path,
    settings: &AuditSettings,
    translator: &Translator,
) -> Result<PathBuf> {
    let renderer = PdfRenderer::new(&settings.fonts_dir);
    render_document(
        result,
        output,
        &settings.reports_dir,
        translator,
        &renderer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::io::browser::AuditPage;
    use crate::types::AuditFailure;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;
    use url::Url;

    struct CleanDriver;

    struct CleanPage;

    impl AuditPage for CleanPage {
        fn navigate(&mut self, url: &Url, _timeout: Duration) -> Result<u16> {
            if url.host_str() == Some("down.example") {
                Err(Error::Navigation("net::ERR_NAME_NOT_RESOLVED".into()))
            } else {
                Ok(200)
            }
        }

        fn inject_script(&mut self, _source: &str) -> Result<()> {
            Ok(())
        }

        fn run_rule_engine(&mut self) -> Result<serde_json::Value> {
            Ok(json!({ "violations": [] }))
        }
    }

    impl PageDriver for CleanDriver {
        fn open_page(&self) -> Result<Box<dyn AuditPage>> {
            Ok(Box::new(CleanPage))
        }
    }

    #[test]
    fn audit_urls_keeps_going_past_failures() {
        let engine = RuleEngineScript::from_source("window.axe = {};");
        let inputs: Vec<String> = ["a.example", "http://", "down.example", "b.example"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let batch = audit_urls_with(&CleanDriver, &engine, &inputs, &AuditSettings::default());

        assert_eq!(batch.results.len(), 4);
        assert!(batch.has_failures);
        assert!(!batch.results[0].is_error());
        assert!(matches!(
            batch.results[1].error,
            Some(AuditFailure::InvalidUrl { .. })
        ));
        assert!(matches!(
            batch.results[2].error,
            Some(AuditFailure::Navigation { .. })
        ));
        assert!(!batch.results[3].is_error());
        assert_eq!(batch.exit_code(true), 1);
    }

    #[test]
    fn save_pdf_report_without_fonts_is_a_document_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AuditSettings {
            fonts_dir: dir.path().join("no-fonts"),
            reports_dir: dir.path().join("reports"),
            ..AuditSettings::default()
        };
        let translator = Translator::from_tables("en", None, HashMap::new());
        let result = AuditResult::completed(
            "a.example",
            Url::parse("http://a.example/").unwrap(),
            "a-report.pdf".into(),
            vec![],
        );

        let err = save_pdf_report(&result, Path::new("a.pdf"), &settings, &translator)
            .unwrap_err();
        assert!(matches!(err, Error::Document(_)));
    }
}
