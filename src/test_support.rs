//! In-memory fixtures shared by unit tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::loader::{FileSystem, LoadResult};

/// [`FileSystem`] over a fixed set of files.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
    unreadable: HashSet<PathBuf>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.files.insert(path.into(), contents.to_string());
        self
    }

    /// Registers a path that exists but fails to read.
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.unreadable.insert(path.into());
        self
    }
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> LoadResult {
        if self.unreadable.contains(path) {
            return LoadResult::Unreadable {
                reason: "permission denied".to_string(),
            };
        }
        self.files
            .get(path)
            .map_or(LoadResult::NotFound, |contents| LoadResult::Loaded(contents.clone()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.unreadable.contains(path)
    }
}
