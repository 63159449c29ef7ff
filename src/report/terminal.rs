use owo_colors::OwoColorize;

use crate::io::locale::{Key, Translator};
use crate::types::{AuditResult, Impact};

/// Colour `text` by severity tier. Unknown impacts stay uncoloured.
pub fn paint_impact(text: &str, impact: Impact, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match impact {
        Impact::Critical => text.red().to_string(),
        Impact::Serious => text.yellow().to_string(),
        Impact::Moderate => text.blue().to_string(),
        Impact::Minor => text.bright_black().to_string(),
        Impact::Unknown => text.to_string(),
    }
}

/// Human-readable rendering of one audit result, grouped by severity.
pub struct TerminalReport<'a> {
    translator: &'a Translator,
    use_colors: bool,
}

impl<'a> TerminalReport<'a> {
    pub fn new(translator: &'a Translator, use_colors: bool) -> Self {
        Self {
            translator,
            use_colors,
        }
    }

    pub fn header(&self, result: &AuditResult) -> String {
        let text = self.translator.t(
            Key::ResultHeader,
            &[("url", result.display_url().to_string())],
        );
        if self.use_colors {
            text.blue().to_string()
        } else {
            text
        }
    }

    /// Lines for the issue list and severity tally. A clean result yields
    /// only the no-violations line.
    pub fn render(&self, result: &AuditResult) -> Vec<String> {
        let tr = self.translator;
        let tally = result.tally();

        if tally.is_empty() {
            let text = tr.text(Key::NoViolations);
            return vec![if self.use_colors {
                text.green().to_string()
            } else {
                text
            }];
        }

        let impact_label = tr.text(Key::PdfImpact);
        let help_label = tr.text(Key::PdfHelp);
        let tags_label = tr.text(Key::PdfTags);

        let mut lines = Vec::with_capacity(result.issues.len() * 5 + 6);
        for (index, issue) in result.issues.iter().enumerate() {
            let title = format!("[{}] {}", index + 1, issue.description);
            lines.push(if self.use_colors {
                title.cyan().to_string()
            } else {
                title
            });
            lines.push(paint_impact(
                &format!("  {}: {}", impact_label, issue.impact),
                issue.impact,
                self.use_colors,
            ));
            lines.push(format!("  {}: {}", help_label, issue.help));
            lines.push(format!("  {}: {}", tags_label, issue.joined_tags()));
            lines.push(String::new());
        }

        let summary = tr.text(Key::Summary);
        lines.push(if self.use_colors {
            summary.bright_black().to_string()
        } else {
            summary
        });
        for (impact, count) in tally.iter() {
            lines.push(paint_impact(
                &format!("  {}: {}", impact, count),
                impact,
                self.use_colors,
            ));
        }

        lines
    }
}
