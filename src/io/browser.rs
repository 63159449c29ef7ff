//! Browser collaborator: a page factory plus the three page operations the
//! audit needs (navigate, inject a script, run the rule engine).
//!
//! A page is a scoped resource. Dropping the boxed `AuditPage` releases the
//! tab and the browser process behind it, on success and failure alike.
use std::time::Duration;

use url::Url;

use crate::error::Result;

/// Produces one fresh page per audited URL.
pub trait PageDriver {
    fn open_page(&self) -> Result<Box<dyn AuditPage>>;
}

pub trait AuditPage {
    /// Load `url` and return the main document's HTTP status (0 when unknown).
    fn navigate(&mut self, url: &Url, timeout: Duration) -> Result<u16>;

    /// Evaluate `source` in the page context.
    fn inject_script(&mut self, source: &str) -> Result<()>;

    /// Run the injected engine and return its raw result object.
    fn run_rule_engine(&mut self) -> Result<serde_json::Value>;
}

#[cfg(feature = "chrome")]
pub use chrome::ChromeDriver;

#[cfg(feature = "chrome")]
mod chrome {
    use std::sync::Arc;
    use std::time::Duration;

    use headless_chrome::{Browser, LaunchOptions, Tab};
    use tracing::debug;
    use url::Url;

    use super::{AuditPage, PageDriver};
    use crate::core::params::AuditSettings;
    use crate::error::{Error, Result};

    const NAVIGATION_STATUS_JS: &str = "(() => { \
        const entry = performance.getEntriesByType('navigation')[0]; \
        return entry && entry.responseStatus ? entry.responseStatus : 0; \
    })()";

    const RUN_AXE_JS: &str =
        "axe.run().then((results) => JSON.stringify({ violations: results.violations }))";

    /// Launches a headless Chrome per page.
    #[derive(Debug, Clone)]
    pub struct ChromeDriver {
        sandbox: bool,
        idle_timeout: Duration,
    }

    impl ChromeDriver {
        pub fn new(settings: &AuditSettings) -> Self {
            Self {
                sandbox: settings.sandbox,
                // the rule engine can run well past the navigation bound on large pages
                idle_timeout: settings.navigation_timeout() * 8,
            }
        }
    }

    impl PageDriver for ChromeDriver {
        fn open_page(&self) -> Result<Box<dyn AuditPage>> {
            let options = LaunchOptions::default_builder()
                .headless(true)
                .sandbox(self.sandbox)
                .idle_browser_timeout(self.idle_timeout)
                .build()
                .map_err(Error::external)?;
            let browser = Browser::new(options)
                .map_err(|e| Error::Navigation(format!("cannot launch browser: {}", e)))?;
            let tab = browser
                .new_tab()
                .map_err(|e| Error::Navigation(format!("cannot open tab: {}", e)))?;
            debug!("Opened headless Chrome tab");
            Ok(Box::new(ChromePage {
                tab,
                _browser: browser,
            }))
        }
    }

    // field order matters: the tab is released before the browser process
    struct ChromePage {
        tab: Arc<Tab>,
        _browser: Browser,
    }

    impl AuditPage for ChromePage {
        fn navigate(&mut self, url: &Url, timeout: Duration) -> Result<u16> {
            self.tab.set_default_timeout(timeout);
            self.tab
                .navigate_to(url.as_str())
                .and_then(|tab| tab.wait_until_navigated())
                .map_err(|e| Error::Navigation(e.to_string()))?;
            let status = self
                .tab
                .evaluate(NAVIGATION_STATUS_JS, false)
                .map_err(|e| Error::Navigation(e.to_string()))?;
            Ok(status
                .value
                .and_then(|v| v.as_u64())
                .and_then(|code| u16::try_from(code).ok())
                .unwrap_or(0))
        }

        fn inject_script(&mut self, source: &str) -> Result<()> {
            self.tab
                .evaluate(source, false)
                .map_err(|e| Error::RuleEngine(e.to_string()))?;
            Ok(())
        }

        fn run_rule_engine(&mut self) -> Result<serde_json::Value> {
            let remote = self
                .tab
                .evaluate(RUN_AXE_JS, true)
                .map_err(|e| Error::RuleEngine(e.to_string()))?;
            match remote.value {
                Some(serde_json::Value::String(json)) => Ok(serde_json::from_str(&json)?),
                other => Err(Error::RuleEngine(format!(
                    "unexpected rule engine result: {:?}",
                    other
                ))),
            }
        }
    }

    impl Drop for ChromePage {
        fn drop(&mut self) {
            if let Err(e) = self.tab.close(false) {
                debug!("Closing tab failed: {}", e);
            }
            debug!("Released headless Chrome");
        }
    }
}
