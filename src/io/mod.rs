//! Adapters for the collaborators the audit pipeline drives: the headless
//! browser (`browser`), translation tables (`locale`), operator prompts
//! (`prompt`), terminal output (`host`, `progress`), and document `writers`.
pub mod browser;
pub use browser::{AuditPage, PageDriver};
#[cfg(feature = "chrome")]
pub use browser::ChromeDriver;

pub mod host;
pub use host::{BufferHost, Host, StdHost};

pub mod locale;
pub use locale::{Key, Translator};

pub mod progress;
pub use progress::Spinner;

pub mod prompt;
pub use prompt::{Prompter, TerminalPrompter};

pub mod writers;
