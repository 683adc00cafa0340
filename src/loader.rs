//! File system access for candidate configuration files.
//!
//! Reading is modeled so that nothing here can fail a resolution call: a
//! missing or unreadable file is just a candidate that does not contribute.

use std::io::ErrorKind;
use std::path::Path;

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

/// Result of reading a candidate file.
///
/// Explicitly models the three outcomes so callers can log them
/// differently while treating all non-`Loaded` cases the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    /// The file exists and was read as UTF-8 text.
    Loaded(String),

    /// No file exists at the path.
    NotFound,

    /// The file exists but could not be read.
    Unreadable {
        /// Reason for the failure (for logging/debugging).
        reason: String,
    },
}

impl LoadResult {
    /// Returns the contents when the file was read and is non-empty.
    ///
    /// An empty file carries nothing to merge and is treated like a missing one.
    #[must_use]
    pub fn into_contents(self) -> Option<String> {
        match self {
            Self::Loaded(contents) if !contents.is_empty() => Some(contents),
            Self::Loaded(_) | Self::NotFound | Self::Unreadable { .. } => None,
        }
    }
}

/// Abstraction over the two file-system primitives resolution needs.
///
/// Implementations must never panic or error: absence is an answer.
pub trait FileSystem {
    /// Reads the file at `path`.
    fn read(&self, path: &Path) -> LoadResult;

    /// Returns `true` if something exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read(&self, path: &Path) -> LoadResult {
        match std::fs::read_to_string(path) {
            Ok(contents) => LoadResult::Loaded(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => LoadResult::NotFound,
            Err(e) => LoadResult::Unreadable {
                reason: e.to_string(),
            },
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Reads a candidate, logging why it did not contribute.
pub fn load<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Option<String> {
    let result = fs.read(path);
    match &result {
        LoadResult::Loaded(contents) if contents.is_empty() => {
            tracing::debug!(path = %path.display(), "Config file is empty, skipping");
        }
        LoadResult::Loaded(_) => {
            tracing::debug!(path = %path.display(), "Read config file");
        }
        LoadResult::NotFound => {
            tracing::trace!(path = %path.display(), "No config file");
        }
        LoadResult::Unreadable { reason } => {
            tracing::debug!(path = %path.display(), reason = %reason, "Config file unreadable, skipping");
        }
    }
    result.into_contents()
}
