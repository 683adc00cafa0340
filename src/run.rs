//! Resolution command execution.
//!
//! Resolves configuration for the requested application name and writes
//! the merged object to stdout as JSON.

use std::io::Write;

use serde::Serialize;
use thiserror::Error;

use layered_rc::cli::{Cli, DefaultsError, load_defaults};
use layered_rc::loader::FileSystem;
use layered_rc::{ConfigError, Resolver, args};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The `--defaults` file could not be loaded.
    #[error(transparent)]
    Defaults(#[from] DefaultsError),

    /// Resolution failed.
    #[error(transparent)]
    Resolve(#[from] ConfigError),

    /// The merged configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[source] std::io::Error),
}

/// Resolves configuration for the running process and prints it.
///
/// # Errors
///
/// Returns an error if defaults cannot be loaded, resolution fails, or
/// the output cannot be written.
pub fn execute(cli: &Cli) -> Result<(), RunError> {
    let resolver = Resolver::from_process();
    let stdout = std::io::stdout();
    execute_with(cli, &resolver, &mut stdout.lock())
}

/// Runs one resolution with an injected resolver and output sink.
fn execute_with<F: FileSystem, W: Write>(
    cli: &Cli,
    resolver: &Resolver<F>,
    out: &mut W,
) -> Result<(), RunError> {
    let defaults = load_defaults(cli.defaults.as_deref())?;
    let argv = args::parse(&cli.app_args);

    let resolution = resolver.resolve(&cli.name, &defaults, Some(&argv))?;
    tracing::info!(
        "Resolved configuration for '{}' from {} file(s)",
        cli.name,
        resolution.contributions.len()
    );

    let rendered = if cli.explain {
        render(&resolution, cli.compact)
    } else {
        render(&resolution.config, cli.compact)
    }
    .map_err(RunError::Serialize)?;

    writeln!(out, "{rendered}").map_err(RunError::Output)
}

fn render<T: Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}
