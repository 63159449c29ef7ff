//! Operator prompts used by the interactive save flow.
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};

use crate::error::{Error, Result};

/// Request/response prompt capability.
pub trait Prompter {
    /// Yes/no question; an empty answer picks `default`.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Free-text question; an empty answer picks `default`.
    fn ask(&mut self, question: &str, default: &str) -> Result<String>;
}

/// Terminal prompts on stderr.
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(default)
            .interact()
            .map_err(|e| Error::Prompt(e.to_string()))
    }

    fn ask(&mut self, question: &str, default: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(question)
            .default(default.to_string())
            .interact_text()
            .map_err(|e| Error::Prompt(e.to_string()))
    }
}
