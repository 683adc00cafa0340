//! CLI argument parsing using clap.
//!
//! Defines the command-line interface of the `layered-rc` binary, which
//! resolves configuration for any application name and prints it as JSON.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::Value;
use thiserror::Error;

use crate::parser::strip_comments;

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

/// Layered-RC: Layered Application Configuration
///
/// Resolves the configuration an application named NAME would see, from
/// defaults, config files, `NAME_*` environment variables and arguments.
#[derive(Debug, Parser)]
#[command(name = "layered-rc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Application name used for file discovery and the environment prefix
    pub name: String,

    /// JSON (comments allowed) or TOML file holding default values
    #[arg(long, short, value_name = "FILE")]
    pub defaults: Option<PathBuf>,

    /// Print compact JSON instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,

    /// Print `{"config": ..., "contributions": [...]}` instead of the configuration alone
    #[arg(long)]
    pub explain: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Application arguments, given after `--`, forming the argument layer
    #[arg(last = true, value_name = "APP_ARGS")]
    pub app_args: Vec<String>,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}

/// Error loading the `--defaults` file.
#[derive(Debug, Error)]
pub enum DefaultsError {
    /// Failed to read the defaults file.
    #[error("Failed to read defaults file '{}': {source}", path.display())]
    FileRead {
        /// Path to the defaults file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML defaults.
    #[error("Failed to parse TOML defaults: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to parse JSON defaults.
    #[error("Failed to parse JSON defaults: {0}")]
    JsonParse(#[from] serde_json::Error),
}

/// Loads the defaults object; no file means an empty object.
///
/// Files ending in `.toml` are read as TOML, everything else as JSON with
/// comments. The result is not checked for being an object here; the
/// resolver reports that.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_defaults(path: Option<&Path>) -> Result<Value, DefaultsError> {
    let Some(path) = path else {
        return Ok(Value::Object(serde_json::Map::new()));
    };

    let content = std::fs::read_to_string(path).map_err(|e| DefaultsError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("toml")) {
        let table: toml::Table = toml::from_str(&content)?;
        Ok(serde_json::to_value(table)?)
    } else {
        Ok(serde_json::from_str(&strip_comments(&content))?)
    }
}
