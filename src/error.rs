//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, JSON and URL errors, and provides semantic variants
//! for the collaborators the pipeline drives (browser, rule engine, document
//! renderer, prompts) and for the two fatal classes (usage and configuration).
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Rule engine error: {0}")]
    RuleEngine(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Usage error: {0}")]
    Usage(String),

    #[error("External error: {0}")]
    External(String),
}

impl Error {
    pub fn external<E: std::fmt::Display>(e: E) -> Self {
        Error::External(e.to_string())
    }

    /// Only usage and configuration problems abort a whole run; everything
    /// else is recorded against the URL being processed.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Usage(_) | Error::Configuration(_))
    }
}
