//! Batch orchestration: resolve the input list, audit each URL strictly one
//! after another, print both renderings, run the save flow, and decide the
//! exit code.
use std::fs;
use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use tracing::{debug, info, warn};

use crate::core::audit::{RuleEngineScript, audit_or_record, normalize_url};
use crate::core::params::AuditSettings;
use crate::core::save::save_report;
use crate::error::{Error, Result};
use crate::io::browser::PageDriver;
use crate::io::host::Host;
use crate::io::locale::{Key, Translator};
use crate::io::progress::Spinner;
use crate::io::prompt::Prompter;
use crate::report::document::DocumentRenderer;
use crate::report::terminal::TerminalReport;
use crate::types::{AuditFailure, AuditResult, BatchRun};

/// Turn positional inputs into the URL list.
///
/// A single input naming a readable file is read as newline-delimited URLs
/// (lines trimmed, blanks dropped). Anything else is taken as URLs directly.
pub fn resolve_inputs(inputs: &[String]) -> Result<Vec<String>> {
    let urls: Vec<String> = match inputs {
        [single] if Path::new(single).is_file() => match fs::read_to_string(single) {
            Ok(content) => {
                debug!("Reading URL list from {}", single);
                content
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(str::to_string)
                    .collect()
            }
            Err(e) => {
                warn!("Cannot read {} ({}), treating it as a URL", single, e);
                vec![single.trim().to_string()]
            }
        },
        _ => inputs
            .iter()
            .map(|input| input.trim())
            .filter(|input| !input.is_empty())
            .map(str::to_string)
            .collect(),
    };

    if urls.is_empty() {
        return Err(Error::Usage("no URLs to audit".to_string()));
    }
    info!("Resolved {} URL(s) to audit", urls.len());
    Ok(urls)
}

/// Everything one run needs, passed explicitly.
pub struct Pipeline<'a> {
    pub settings: &'a AuditSettings,
    pub translator: &'a Translator,
    pub driver: &'a dyn PageDriver,
    pub engine: &'a RuleEngineScript,
    pub prompter: &'a mut dyn Prompter,
    pub renderer: &'a dyn DocumentRenderer,
}

impl Pipeline<'_> {
    /// Resolve `inputs`, audit them, and return the process exit code.
    pub fn run<H: Host>(&mut self, host: &mut H, inputs: &[String]) -> u8 {
        let urls = match resolve_inputs(inputs) {
            Ok(urls) => urls,
            Err(e) => {
                debug!("{}", e);
                let _ = writeln!(host.error(), "{}", self.translator.text(Key::ProvideUrls));
                return 1;
            }
        };

        match self.run_batch(host, &urls) {
            Ok(batch) => {
                info!(
                    "Batch complete: {} URL(s), failures: {}",
                    batch.results.len(),
                    batch.has_failures
                );
                batch.exit_code(self.settings.ci)
            }
            Err(e) => {
                let _ = writeln!(host.error(), "{}", e);
                1
            }
        }
    }

    /// Audit `urls` sequentially. Per-URL problems are recorded and the
    /// batch continues; only output failures end it early.
    pub fn run_batch<H: Host>(&mut self, host: &mut H, urls: &[String]) -> Result<BatchRun> {
        let mut batch = BatchRun::default();
        for url in urls {
            let result = self.process_url(host, url)?;
            batch.record(result);
        }
        Ok(batch)
    }

    fn process_url<H: Host>(&mut self, host: &mut H, input: &str) -> Result<AuditResult> {
        let tr = self.translator;
        let colors = self.settings.use_colors;
        let shown_url = normalize_url(input)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| input.to_string());

        let spinner = Spinner::start(
            tr.t(Key::Auditing, &[("url", shown_url.clone())]),
            self.settings.show_progress,
        );

        let result = audit_or_record(
            self.driver,
            self.engine,
            input,
            self.settings.navigation_timeout(),
        );

        let status_line = match &result.error {
            None => tr.t(Key::FinishedAudit, &[("url", shown_url.clone())]),
            Some(AuditFailure::BadStatus { code }) => tr.t(
                Key::BadResponse,
                &[
                    ("url", shown_url.clone()),
                    (
                        "code",
                        code.map_or_else(|| "Unknown".to_string(), |c| c.to_string()),
                    ),
                ],
            ),
            Some(failure) => tr.t(
                Key::FailToLoad,
                &[("url", shown_url.clone()), ("error", failure.to_string())],
            ),
        };
        spinner.finish(status_line, &mut host.error())?;

        if let Some(failure) = &result.error {
            let line = tr.t(
                Key::ErrorFor,
                &[("url", input.to_string()), ("error", failure.to_string())],
            );
            writeln!(
                host.error(),
                "{}",
                if colors { line.red().to_string() } else { line }
            )?;
            return Ok(result);
        }

        let tally = result.tally();
        debug!(
            "{} issue(s) across {} severity tier(s) for {}",
            tally.total(),
            tally.len(),
            shown_url
        );

        let report = TerminalReport::new(tr, colors);
        {
            let mut out = host.output();
            writeln!(out)?;
            writeln!(out, "{}", report.header(&result))?;
            writeln!(out)?;
            for line in report.render(&result) {
                writeln!(out, "{}", line)?;
            }
            writeln!(out)?;
        }

        if result.has_issues() {
            if let Err(e) = save_report(
                host,
                &result,
                self.settings,
                tr,
                &mut *self.prompter,
                self.renderer,
            ) {
                warn!("Saving report for {} failed: {}", input, e);
                let line = tr.t(
                    Key::ErrorFor,
                    &[("url", input.to_string()), ("error", e.to_string())],
                );
                writeln!(
                    host.error(),
                    "{}",
                    if colors { line.red().to_string() } else { line }
                )?;
            }
        }

        Ok(result)
    }
}
