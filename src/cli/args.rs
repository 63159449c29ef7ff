use clap::Parser;
use std::path::PathBuf;

use checkaccess::AuditSettings;
use checkaccess::core::params::{DEFAULT_LANG, DEFAULT_NAVIGATION_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "checkaccess",
    version,
    about = "Audit web pages for accessibility violations"
)]
pub struct CliArgs {
    /// URLs to audit, or a single file with one URL per line
    #[arg(value_name = "URL|FILE")]
    pub inputs: Vec<String>,

    /// Non-interactive mode: no prompts, `{host}-report.pdf` names, exit 1 on any failure
    #[arg(long, default_value_t = false)]
    pub ci: bool,

    /// Language for all messages and reports
    #[arg(long, value_name = "CODE", default_value = DEFAULT_LANG, env = "CHECKACCESS_LANG")]
    pub lang: String,

    /// Directory holding `<code>.json` translation tables
    #[arg(long, default_value = "locales", env = "CHECKACCESS_LOCALES_DIR")]
    pub locales_dir: PathBuf,

    /// Directory holding the DejaVu Sans fonts used for PDF output
    #[arg(long, default_value = "fonts", env = "CHECKACCESS_FONTS_DIR")]
    pub fonts_dir: PathBuf,

    /// Path to the axe-core bundle injected into each page
    #[arg(
        long,
        default_value = "node_modules/axe-core/axe.min.js",
        env = "CHECKACCESS_AXE_SCRIPT"
    )]
    pub axe_script: PathBuf,

    /// Root directory for saved reports
    #[arg(long, default_value = "reports", env = "CHECKACCESS_REPORTS_DIR")]
    pub reports_dir: PathBuf,

    /// Page load timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_NAVIGATION_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Launch Chrome without its sandbox (needed in some containers)
    #[arg(long, default_value_t = false)]
    pub no_sandbox: bool,

    /// Disable coloured output
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}

impl CliArgs {
    pub fn settings(&self) -> AuditSettings {
        AuditSettings {
            ci: self.ci,
            lang: self.lang.clone(),
            navigation_timeout_secs: self.timeout,
            reports_dir: self.reports_dir.clone(),
            locales_dir: self.locales_dir.clone(),
            fonts_dir: self.fonts_dir.clone(),
            rule_engine_script: self.axe_script.clone(),
            use_colors: !self.no_color,
            show_progress: true,
            sandbox: !self.no_sandbox,
        }
    }
}
