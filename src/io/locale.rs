//! Translation tables loaded from `<locales_dir>/<code>.json`.
//!
//! Each table is a flat JSON object mapping a message key to a template.
//! Templates interpolate `{{name}}` placeholders. Lookups go requested
//! language → default language → the key itself.
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::params::DEFAULT_LANG;
use crate::error::{Error, Result};

/// Every message identifier the tool displays.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Key {
    ProvideUrls,
    Auditing,
    FailToLoad,
    BadResponse,
    FinishedAudit,
    ErrorFor,
    ResultHeader,
    NoViolations,
    Summary,
    SavePdf,
    OutputFilename,
    GeneratingPdf,
    PdfSaved,
    CreatedFolder,
    PdfTitle,
    PdfGenerated,
    PdfUrl,
    PdfNoIssues,
    PdfFoundIssues,
    PdfImpact,
    PdfHelp,
    PdfTags,
    PdfFooterNote,
}

impl Key {
    pub const ALL: [Key; 23] = [
        Key::ProvideUrls,
        Key::Auditing,
        Key::FailToLoad,
        Key::BadResponse,
        Key::FinishedAudit,
        Key::ErrorFor,
        Key::ResultHeader,
        Key::NoViolations,
        Key::Summary,
        Key::SavePdf,
        Key::OutputFilename,
        Key::GeneratingPdf,
        Key::PdfSaved,
        Key::CreatedFolder,
        Key::PdfTitle,
        Key::PdfGenerated,
        Key::PdfUrl,
        Key::PdfNoIssues,
        Key::PdfFoundIssues,
        Key::PdfImpact,
        Key::PdfHelp,
        Key::PdfTags,
        Key::PdfFooterNote,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Key::ProvideUrls => "provideUrls",
            Key::Auditing => "auditing",
            Key::FailToLoad => "failToLoad",
            Key::BadResponse => "badResponse",
            Key::FinishedAudit => "finishedAudit",
            Key::ErrorFor => "errorFor",
            Key::ResultHeader => "resultHeader",
            Key::NoViolations => "noViolations",
            Key::Summary => "summary",
            Key::SavePdf => "savePdf",
            Key::OutputFilename => "outputFilename",
            Key::GeneratingPdf => "generatingPdf",
            Key::PdfSaved => "pdfSaved",
            Key::CreatedFolder => "createdFolder",
            Key::PdfTitle => "pdfTitle",
            Key::PdfGenerated => "pdfGenerated",
            Key::PdfUrl => "pdfUrl",
            Key::PdfNoIssues => "pdfNoIssues",
            Key::PdfFoundIssues => "pdfFoundIssues",
            Key::PdfImpact => "pdfImpact",
            Key::PdfHelp => "pdfHelp",
            Key::PdfTags => "pdfTags",
            Key::PdfFooterNote => "pdfFooterNote",
        }
    }
}

type Table = HashMap<String, String>;

/// Resolved translation tables for one run.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: String,
    selected: Option<Table>,
    fallback: Table,
}

impl Translator {
    /// Load the default table (required) and the requested one (optional).
    pub fn load(locales_dir: &Path, lang: &str) -> Result<Self> {
        let fallback_path = locales_dir.join(format!("{}.json", DEFAULT_LANG));
        let fallback = read_table(&fallback_path).map_err(|e| {
            Error::Configuration(format!(
                "cannot load default translations {}: {}",
                fallback_path.display(),
                e
            ))
        })?;

        let selected = if lang == DEFAULT_LANG {
            None
        } else {
            let path = locales_dir.join(format!("{}.json", lang));
            match read_table(&path) {
                Ok(table) => Some(table),
                Err(e) => {
                    warn!(
                        "Language '{}' unavailable ({}), falling back to '{}'",
                        lang, e, DEFAULT_LANG
                    );
                    None
                }
            }
        };

        debug!("Loaded translations for '{}' from {:?}", lang, locales_dir);
        Ok(Self {
            lang: lang.to_string(),
            selected,
            fallback,
        })
    }

    /// Build a translator from in-memory tables.
    pub fn from_tables(
        lang: &str,
        selected: Option<HashMap<String, String>>,
        fallback: HashMap<String, String>,
    ) -> Self {
        Self {
            lang: lang.to_string(),
            selected,
            fallback,
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Installed language codes, sorted.
    pub fn available_languages(locales_dir: &Path) -> Vec<String> {
        let Ok(entries) = fs::read_dir(locales_dir) else {
            return Vec::new();
        };
        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Look up `key` and substitute `{{name}}` placeholders from `args`.
    pub fn t(&self, key: Key, args: &[(&str, String)]) -> String {
        let id = key.as_str();
        let template = self
            .selected
            .as_ref()
            .and_then(|table| table.get(id))
            .or_else(|| self.fallback.get(id))
            .map(String::as_str)
            .unwrap_or(id);
        interpolate(template, args)
    }

    /// Shorthand for keys without placeholders.
    pub fn text(&self, key: Key) -> String {
        self.t(key, &[])
    }
}

fn read_table(path: &Path) -> Result<Table> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn interpolate(template: &str, args: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = after[..end].trim();
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => out.push_str(value),
            // unknown placeholders stay visible
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn interpolates_named_placeholders() {
        let tr = Translator::from_tables(
            "en",
            None,
            table(&[("failToLoad", "Failed to load {{url}}: {{ error }}")]),
        );
        let out = tr.t(
            Key::FailToLoad,
            &[
                ("url", "http://a.example/".to_string()),
                ("error", "timeout".to_string()),
            ],
        );
        assert_eq!(out, "Failed to load http://a.example/: timeout");
    }

    #[test]
    fn numbers_interpolate() {
        let tr = Translator::from_tables(
            "en",
            None,
            table(&[("pdfFoundIssues", "Found {{count}} issues")]),
        );
        assert_eq!(tr.t(Key::PdfFoundIssues, &[("count", 3.to_string())]), "Found 3 issues");
    }

    #[test]
    fn missing_placeholder_argument_is_left_in_place() {
        let tr = Translator::from_tables("en", None, table(&[("auditing", "Auditing {{url}}")]));
        assert_eq!(tr.text(Key::Auditing), "Auditing {{url}}");
    }

    #[test]
    fn selected_language_wins_then_falls_back() {
        let tr = Translator::from_tables(
            "fr",
            Some(table(&[("summary", "Résumé")])),
            table(&[("summary", "Summary"), ("pdfHelp", "Help")]),
        );
        assert_eq!(tr.text(Key::Summary), "Résumé");
        assert_eq!(tr.text(Key::PdfHelp), "Help");
        assert_eq!(tr.text(Key::PdfTags), "pdfTags");
    }

    #[test]
    fn load_requires_default_table() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fr.json"), r#"{"summary": "Résumé"}"#).unwrap();
        let err = Translator::load(dir.path(), "fr").unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn load_unknown_language_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.json"), r#"{"summary": "Summary"}"#).unwrap();
        let tr = Translator::load(dir.path(), "xx").unwrap();
        assert_eq!(tr.lang(), "xx");
        assert_eq!(tr.text(Key::Summary), "Summary");
    }

    #[test]
    fn available_languages_lists_json_tables_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["fr.json", "en.json", "de.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        assert_eq!(
            Translator::available_languages(dir.path()),
            vec!["de", "en", "fr"]
        );
        assert!(Translator::available_languages(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn bundled_tables_define_every_key() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("locales");
        let langs = Translator::available_languages(&dir);
        assert!(langs.contains(&"en".to_string()));
        for lang in langs {
            let table = read_table(&dir.join(format!("{}.json", lang))).unwrap();
            for key in Key::ALL {
                assert!(
                    table.contains_key(key.as_str()),
                    "{}.json is missing {}",
                    lang,
                    key.as_str()
                );
            }
        }
    }
}
