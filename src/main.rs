//! Layered-RC: Layered Application Configuration
//!
//! Entry point for the layered-rc application.

use layered_rc::cli::Cli;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, exit_code_for, print_error_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    setup_tracing(cli.verbose);

    match run::execute(&cli) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            print_error_hint(&e);
            exit_code_for(&e)
        }
    }
}
