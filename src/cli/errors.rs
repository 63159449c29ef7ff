use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    /// Startup failures: unreadable translations or rule engine script.
    #[error(transparent)]
    Audit(#[from] checkaccess::Error),
}
