#![doc = r#"
checkaccess — accessibility audits for web pages.

This crate loads each URL in a headless browser, injects the axe-core rule engine,
and turns the violations it reports into a coloured terminal summary and, when there
is something to report, a PDF document. It powers the `checkaccess` CLI and can be
embedded in your own Rust tools.

Stability
---------
The public library API is experimental in initial releases and may change.

Requirements
------------
- A Chrome or Chromium installation for the default `chrome` feature.
- The axe-core bundle (`node_modules/axe-core/axe.min.js` by default).
- DejaVu Sans TrueType fonts in the fonts directory for PDF output.
- Rust 2024 edition toolchain.

Add dependency
--------------
```toml
[dependencies]
checkaccess = "0.1"
```

Quick start: audit one URL
--------------------------
```rust,no_run
use checkaccess::{AuditSettings, audit_url};

fn main() -> checkaccess::Result<()> {
    let settings = AuditSettings::default();
    let result = audit_url("example.com", &settings)?;

    match &result.error {
        Some(failure) => eprintln!("{}: {}", result.url, failure),
        None => {
            for (impact, count) in result.tally().iter() {
                println!("{impact}: {count}");
            }
        }
    }
    Ok(())
}
```

Audit a list and write reports
------------------------------
```rust,no_run
use std::path::Path;
use checkaccess::{AuditSettings, Translator, audit_urls, save_pdf_report};

fn main() -> checkaccess::Result<()> {
    let settings = AuditSettings {
        ci: true,
        ..AuditSettings::default()
    };
    let translator = Translator::load(&settings.locales_dir, "fr")?;
    let inputs = vec!["example.com".to_string(), "example.org".to_string()];

    let batch = audit_urls(&inputs, &settings)?;
    for result in batch.results.iter().filter(|r| r.has_issues()) {
        let name = format!("{}.pdf", result.url);
        let path = save_pdf_report(result, Path::new(&name), &settings, &translator)?;
        println!("saved {}", path.display());
    }
    std::process::exit(batch.exit_code(settings.ci).into());
}
```

Error handling
--------------
All public functions return `checkaccess::Result<T>`. Problems with a single URL
(navigation, HTTP status, rule engine) are not errors: they are recorded on the
`AuditResult` as an `AuditFailure`. Only configuration and usage problems are fatal.

```rust,no_run
use checkaccess::{AuditSettings, Error, audit_url};

fn main() {
    match audit_url("not a url", &AuditSettings::default()) {
        Ok(result) => println!("{:?}", result.error),
        Err(Error::InvalidUrl { input, .. }) => eprintln!("cannot parse {input}"),
        Err(Error::Configuration(e)) => eprintln!("setup problem: {e}"),
        Err(other) => eprintln!("other error: {other}"),
    }
}
```

Feature flags
-------------
- `chrome` (default): the `headless_chrome` page driver and the CLI binary.

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`types`] — result model (`Impact`, `Issue`, `AuditResult`, `SeverityTally`).
- [`io`] — browser, translations, prompts, terminal host and PDF writer.
- [`report`] — terminal and document renderings of a result.
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod report;
pub mod types;

// Curated public API surface
// Types
pub use core::params::AuditSettings;
pub use error::{Error, Result};
pub use types::{AuditFailure, AuditResult, BatchRun, Impact, Issue, SeverityTally};

// Collaborators
pub use io::browser::{AuditPage, PageDriver};
#[cfg(feature = "chrome")]
pub use io::browser::ChromeDriver;
pub use io::host::{Host, StdHost};
pub use io::locale::{Key, Translator};
pub use io::prompt::{Prompter, TerminalPrompter};
pub use io::writers::PdfRenderer;
pub use report::{DocumentRenderer, TerminalReport};

// Pipeline building blocks
pub use core::audit::{RuleEngineScript, normalize_url, run_audit};
pub use core::batch::{Pipeline, resolve_inputs};
pub use core::save::save_report;

// High-level API re-exports
pub use api::{audit_url_with, audit_urls_with, save_pdf_report};
#[cfg(feature = "chrome")]
pub use api::{audit_url, audit_urls};
