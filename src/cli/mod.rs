//! Command Line Interface (CLI) layer for checkaccess.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) that wires flags to the
//! sequential audit pipeline exposed by the library.
//!
//! If you are embedding checkaccess into another application, prefer the
//! high-level `checkaccess::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
