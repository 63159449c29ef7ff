//! Core building blocks: run settings (`params`), the single-URL audit
//! (`audit`), the save flow (`save`), and the sequential batch (`batch`).
//! These are consumed by the high-level `api` module and the CLI.
pub mod audit;
pub mod batch;
pub mod params;
pub mod save;
