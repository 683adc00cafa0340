//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use layered_rc::ConfigError;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::run::RunError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - bad defaults, missing explicit file, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Output error (exit code 2) - stdout closed or serialization failure.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn output_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common resolution errors.
pub fn print_error_hint(error: &RunError) {
    match error {
        RunError::Resolve(ConfigError::UnknownParser { .. }) => {
            eprintln!("\nRename the file to a supported extension, or to '.<name>rc' for auto-detection.");
        }
        RunError::Resolve(ConfigError::ExplicitConfigNotFound { .. }) => {
            eprintln!("\nCheck the path passed via '--config' or the '<name>_config' environment variable.");
        }
        _ => {}
    }
}

/// Maps an execution error to its exit code.
pub fn exit_code_for(error: &RunError) -> std::process::ExitCode {
    match error {
        RunError::Defaults(_) | RunError::Resolve(_) => exit_code::CONFIG_ERROR,
        RunError::Serialize(_) | RunError::Output(_) => exit_code::output_error(),
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so stdout carries only the resolved configuration.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
