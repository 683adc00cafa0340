//! Error types for configuration resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for a resolution call.
///
/// Every variant is terminal: the whole call fails and no merge is performed.
/// Missing or unreadable candidate files are not errors; they simply do not
/// contribute.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The application name holds a NUL byte and cannot be used in paths.
    #[error("rc(name): name must be a string usable in file paths. {name:?} given.")]
    InvalidName {
        /// The rejected name
        name: String,
    },

    /// The defaults value is not a plain object.
    #[error("`defaults` has to be an object, got {kind}")]
    InvalidDefaults {
        /// JSON kind of the rejected value (`array`, `string`, ...)
        kind: &'static str,
    },

    /// A config file passed via `--config` or `<name>_config` does not exist.
    #[error("Explicitly passed config file could not be found at: {}", path.display())]
    ExplicitConfigNotFound {
        /// The path as it was passed
        path: PathBuf,
    },

    /// No parser is registered for the extension derived from a file path.
    #[error("Extension \"{extension}\" does not have a parser. Valid parsers: {available}")]
    UnknownParser {
        /// The derived extension token
        extension: String,
        /// Registered tokens, comma separated, empty token rendered as `''`
        available: String,
    },
}

impl ConfigError {
    /// Creates an `InvalidDefaults` error describing the offending value.
    #[must_use]
    pub fn invalid_defaults(value: &serde_json::Value) -> Self {
        let kind = match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        };
        Self::InvalidDefaults { kind }
    }
}

/// Error produced by a parser that could not decode file contents.
///
/// Never escapes a resolution call: the offending file is skipped.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Strict JSON decoding failed.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A custom parser rejected the input.
    #[error("{0}")]
    Custom(String),
}
