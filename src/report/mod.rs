//! The two renderings of an `AuditResult`: coloured terminal text
//! (`terminal`) and a paginated document (`document`).
pub mod document;
pub mod terminal;

pub use document::{
    DocumentLayout, DocumentRenderer, DocumentReport, LayoutElement, render_document, report_path,
};
pub use terminal::TerminalReport;
