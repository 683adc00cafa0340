//! Parser registry keyed by file extension.
//!
//! This module provides:
//! - The [`ParserRegistry`] mapping extension tokens to decode functions
//! - Extension derivation from file paths ([`extension_of`])
//! - The built-in parsers ([`parse_ambiguous`], [`parse_json`], [`parse_ini`])
//!
//! # Extension tokens
//!
//! The token for a path is the text after its last `.`. Tokens ending in
//! `rc` collapse to the empty "ambiguous" token, so `.apprc` and
//! `app.conf.rc` are decoded by the ambiguous parser. A path without any
//! `.` yields the whole path as its token, which only resolves if that
//! literal string has been registered.

pub mod ini;
mod json;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::path::Path;

use serde_json::{Map, Value};

use crate::defaults::{AMBIGUOUS, RC_SUFFIX};
use crate::error::{ConfigError, ParseError};

pub use json::strip_comments;

/// A configuration object: the universal currency between layers.
pub type ConfigObject = Map<String, Value>;

/// Result of a single parser invocation.
///
/// `Ok(None)` means the parser declined the input without failing; the
/// file simply does not contribute.
pub type ParseResult = Result<Option<ConfigObject>, ParseError>;

/// Signature of a registered parser.
pub type ParseFn = fn(&str) -> ParseResult;

/// Outcome of decoding file contents through the registry.
#[derive(Debug)]
pub enum Parsed {
    /// The parser produced an object to merge.
    Config(ConfigObject),

    /// The parser declined the input (e.g. malformed JSON in a `.json` file).
    Rejected,

    /// The parser reported an error.
    Failed(ParseError),
}

impl From<ParseResult> for Parsed {
    fn from(result: ParseResult) -> Self {
        match result {
            Ok(Some(config)) => Self::Config(config),
            Ok(None) => Self::Rejected,
            Err(e) => Self::Failed(e),
        }
    }
}

// ============================================================================
// Built-in parsers
// ============================================================================

/// Parser for extension-less dotfiles: JSON with comments, falling back to INI.
///
/// # Errors
///
/// Never fails; the INI fallback accepts any text.
#[allow(clippy::unnecessary_wraps)] // Signature fixed by `ParseFn`
pub fn parse_ambiguous(contents: &str) -> ParseResult {
    match json::decode(contents) {
        Ok(value) => Ok(json::into_object(value)),
        Err(_) => Ok(Some(ini::decode(contents))),
    }
}

/// Parser for `.json` files: JSON with comments.
///
/// # Errors
///
/// Never fails; malformed input yields `Ok(None)`.
#[allow(clippy::unnecessary_wraps)] // Signature fixed by `ParseFn`
pub fn parse_json(contents: &str) -> ParseResult {
    Ok(json::decode(contents).ok().and_then(json::into_object))
}

/// Parser for `.ini` files.
///
/// # Errors
///
/// Propagates decoder errors unchanged. The bundled decoder is permissive
/// and currently never produces one.
#[allow(clippy::unnecessary_wraps)] // Signature fixed by `ParseFn`
pub fn parse_ini(contents: &str) -> ParseResult {
    Ok(Some(ini::decode(contents)))
}

// ============================================================================
// Registry
// ============================================================================

/// Ordered mapping from extension token to parser.
///
/// Registration order matters: it drives the order in which
/// extension-specific candidate paths are enumerated.
///
/// # Examples
///
/// ```
/// use layered_rc::parser::{ParseResult, ParserRegistry};
///
/// fn yaml_stub(_: &str) -> ParseResult {
///     Ok(None)
/// }
///
/// let registry = ParserRegistry::default().with("yml", yaml_stub);
/// assert_eq!(registry.available(), "'', json, ini, yml");
/// ```
#[derive(Debug, Clone)]
pub struct ParserRegistry {
    entries: Vec<(String, ParseFn)>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::empty()
            .with(AMBIGUOUS, parse_ambiguous)
            .with("json", parse_json)
            .with("ini", parse_ini)
    }
}

impl ParserRegistry {
    /// Creates a registry with no parsers.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, extension: impl Into<String>, parser: ParseFn) -> Self {
        self.insert(extension, parser);
        self
    }

    /// Registers a parser, replacing any existing one in place.
    ///
    /// Returns the replaced parser, if any.
    pub fn insert(&mut self, extension: impl Into<String>, parser: ParseFn) -> Option<ParseFn> {
        let extension = extension.into();
        if let Some((_, existing)) = self.entries.iter_mut().find(|(ext, _)| *ext == extension) {
            return Some(std::mem::replace(existing, parser));
        }
        self.entries.push((extension, parser));
        None
    }

    /// Removes the parser registered for `extension`.
    pub fn remove(&mut self, extension: &str) -> Option<ParseFn> {
        let index = self.entries.iter().position(|(ext, _)| ext == extension)?;
        Some(self.entries.remove(index).1)
    }

    /// Looks up a parser without producing an error.
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<ParseFn> {
        self.entries
            .iter()
            .find(|(ext, _)| ext == extension)
            .map(|(_, parser)| *parser)
    }

    /// Looks up the parser for `extension`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownParser`] listing every registered token.
    pub fn resolve(&self, extension: &str) -> Result<ParseFn, ConfigError> {
        self.get(extension)
            .ok_or_else(|| ConfigError::UnknownParser {
                extension: extension.to_string(),
                available: self.available(),
            })
    }

    /// Registered tokens in registration order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(ext, _)| ext.as_str())
    }

    /// Registered tokens except the ambiguous one.
    pub fn named_extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions().filter(|ext| !ext.is_empty())
    }

    /// Comma separated token list for diagnostics; the empty token renders as `''`.
    #[must_use]
    pub fn available(&self) -> String {
        self.extensions()
            .map(|ext| if ext.is_empty() { "''" } else { ext })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Decodes `contents` with the parser selected by `path`'s extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownParser`] if no parser is registered for
    /// the derived extension. Parser failures are reported as [`Parsed::Failed`].
    pub fn parse(&self, contents: &str, path: &Path) -> Result<Parsed, ConfigError> {
        let parser = self.resolve(&extension_of(path))?;
        Ok(parser(contents).into())
    }
}

/// Derives the registry token for a path.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use layered_rc::parser::extension_of;
///
/// assert_eq!(extension_of(Path::new("/home/me/.apprc")), "");
/// assert_eq!(extension_of(Path::new("/etc/app/config.json")), "json");
/// assert_eq!(extension_of(Path::new("/no/ext")), "/no/ext");
/// ```
#[must_use]
pub fn extension_of(path: &Path) -> String {
    let text = path.to_string_lossy();
    let ext = text.rsplit('.').next().unwrap_or_default();

    if ext.ends_with(RC_SUFFIX) {
        AMBIGUOUS.to_string()
    } else {
        ext.to_string()
    }
}

/// Renders a token as a file-name suffix: lower-cased and `.`-prefixed.
///
/// The ambiguous token renders as an empty suffix.
#[must_use]
pub fn suffix(extension: &str) -> String {
    if extension.is_empty() {
        String::new()
    } else {
        format!(".{}", extension.to_lowercase())
    }
}
