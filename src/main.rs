//! checkaccess CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, audit the
//! given URLs, and exit with the status the batch decided.
//! For programmatic use, prefer the library API (`checkaccess::api`).

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    ExitCode::from(cli::run(std::env::args_os()))
}
