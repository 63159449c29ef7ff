//! Document writers backing `report::DocumentRenderer`.
pub mod pdf;
pub use pdf::PdfRenderer;
