use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default language and fallback table.
pub const DEFAULT_LANG: &str = "en";

/// Upper bound for a single page load.
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 15;

/// Audit settings suitable for config files and embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditSettings {
    /// Non-interactive mode: no prompts, deterministic filenames, exit 1 on findings
    pub ci: bool,
    /// Translation table code, e.g. "en" or "fr"
    pub lang: String,
    pub navigation_timeout_secs: u64,
    /// Root under which every document is written
    pub reports_dir: PathBuf,
    pub locales_dir: PathBuf,
    /// Directory holding DejaVuSans{,-Bold,-Oblique}.ttf
    pub fonts_dir: PathBuf,
    /// Path to the axe-core bundle injected into each page
    pub rule_engine_script: PathBuf,
    pub use_colors: bool,
    /// Show a spinner per URL on a terminal
    pub show_progress: bool,
    /// Run Chrome with its sandbox (disable inside containers)
    pub sandbox: bool,
}

impl AuditSettings {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            ci: false,
            lang: DEFAULT_LANG.to_string(),
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            reports_dir: PathBuf::from("reports"),
            locales_dir: PathBuf::from("locales"),
            fonts_dir: PathBuf::from("fonts"),
            rule_engine_script: PathBuf::from("node_modules/axe-core/axe.min.js"),
            use_colors: true,
            show_progress: true,
            sandbox: true,
        }
    }
}
