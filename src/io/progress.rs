use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL_MS: u64 = 100;
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// Per-URL activity indicator on stderr.
///
/// When stderr is not a terminal (or progress is disabled) nothing is drawn
/// and the final status line is written to the supplied writer instead, so
/// logs and CI output still record it.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn start(message: String, enabled: bool) -> Self {
        if !enabled || !io::stderr().is_terminal() {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
            bar.set_style(style);
        }
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(TICK_INTERVAL_MS));
        Self { bar: Some(bar) }
    }

    /// Remove the spinner without leaving a line, e.g. before reporting an error.
    pub fn clear(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }

    /// Stop the spinner and leave `line` behind.
    pub fn finish(self, line: String, fallback: &mut impl Write) -> io::Result<()> {
        match self.bar {
            Some(bar) => {
                if let Ok(style) = ProgressStyle::with_template("{msg}") {
                    bar.set_style(style);
                }
                bar.finish_with_message(line);
                Ok(())
            }
            None => writeln!(fallback, "{}", line),
        }
    }
}
