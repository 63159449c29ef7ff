//! Save flow for results with issues.
//!
//! CI mode always writes `{host}-report.pdf` without asking. Interactive mode
//! asks whether to save (default yes), then for a filename (default: the
//! result's suggested name), and skips the document entirely on "no".
use std::io::Write;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use tracing::{debug, info};

use crate::core::audit::{ci_filename, normalize_pdf_filename};
use crate::core::params::AuditSettings;
use crate::error::{Error, Result};
use crate::io::host::Host;
use crate::io::locale::{Key, Translator};
use crate::io::progress::Spinner;
use crate::io::prompt::Prompter;
use crate::report::document::{DocumentRenderer, render_document, report_path};
use crate::types::AuditResult;

/// Pick the document filename (relative to the reports root), or `None`
/// when the operator declines.
pub fn choose_filename(
    result: &AuditResult,
    ci: bool,
    prompter: &mut dyn Prompter,
    translator: &Translator,
) -> Result<Option<PathBuf>> {
    let url = result.normalized_url.as_ref().ok_or_else(|| {
        Error::Document(format!("no parsed URL for '{}'", result.url))
    })?;

    if ci {
        return Ok(Some(PathBuf::from(ci_filename(url))));
    }

    if !prompter.confirm(&translator.text(Key::SavePdf), true)? {
        debug!("Operator declined saving a report for {}", url);
        return Ok(None);
    }

    let default = result
        .suggested_filename
        .clone()
        .unwrap_or_else(|| ci_filename(url));
    let answer = prompter.ask(&translator.text(Key::OutputFilename), &default)?;
    let raw = if answer.trim().is_empty() {
        default
    } else {
        answer
    };
    Ok(Some(normalize_pdf_filename(&raw)))
}

/// Run the save flow for one result. Returns the written path, if any.
pub fn save_report<H: Host>(
    host: &mut H,
    result: &AuditResult,
    settings: &AuditSettings,
    translator: &Translator,
    prompter: &mut dyn Prompter,
    renderer: &dyn DocumentRenderer,
) -> Result<Option<PathBuf>> {
    let Some(filename) = choose_filename(result, settings.ci, prompter, translator)? else {
        return Ok(None);
    };

    let target = report_path(&settings.reports_dir, &filename);
    let new_folder = target
        .parent()
        .filter(|folder| *folder != settings.reports_dir.as_path() && !folder.exists())
        .map(|folder| folder.to_path_buf());

    let spinner = Spinner::start(
        translator.text(Key::GeneratingPdf),
        settings.show_progress && !settings.ci,
    );
    let written = match render_document(
        result,
        &filename,
        &settings.reports_dir,
        translator,
        renderer,
    ) {
        Ok(path) => path,
        Err(e) => {
            spinner.clear();
            return Err(e);
        }
    };
    info!("Saved report for {} to {:?}", result.display_url(), written);

    if let Some(folder) = new_folder.filter(|_| !settings.ci) {
        writeln!(
            host.output(),
            "{}",
            translator.t(
                Key::CreatedFolder,
                &[("folder", folder.display().to_string())]
            )
        )?;
    }

    let saved = translator.t(
        Key::PdfSaved,
        &[("filename", written.display().to_string())],
    );
    let saved = if settings.use_colors {
        saved.green().to_string()
    } else {
        saved
    };
    spinner.finish(saved, &mut host.output())?;

    Ok(Some(written))
}
