//! Candidate configuration file enumeration.
//!
//! Candidates are returned lowest priority first: later files override
//! earlier ones once merged.
//!
//! # Order
//!
//! 1. **System** (not on Windows): `/etc` then `/usr/local/etc`
//! 2. **User** (when a home directory is known): `~/.config` and dotfiles
//! 3. **Project**: the nearest `.<name>rc[.<ext>]` walking up from the
//!    working directory, one per registered extension

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::defaults::{CONFIG_FILE_STEM, ETC, LOCAL_ETC, RC_SUFFIX};
use crate::loader::FileSystem;
use crate::parser::{ParserRegistry, suffix};

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;

/// Inputs that vary by host and drive enumeration.
#[derive(Debug, Clone, Copy)]
pub struct SearchScope<'a> {
    /// Whether the host is Windows (no `/etc` candidates).
    pub is_windows: bool,
    /// User home directory, if known.
    pub home: Option<&'a Path>,
    /// Directory where the upward dotfile search starts.
    pub cwd: &'a Path,
}

/// Enumerates the candidate files for `name`.
///
/// The result is deduplicated, keeping the first occurrence of each path.
/// Project dotfiles that were not found anywhere up the tree are omitted;
/// all other candidates are listed whether or not they exist.
pub fn enumerate<F: FileSystem + ?Sized>(
    name: &str,
    registry: &ParserRegistry,
    scope: SearchScope<'_>,
    fs: &F,
) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if !scope.is_windows {
        for root in [ETC, LOCAL_ETC] {
            files.extend(system_files(Path::new(root), name));
        }
        for root in [ETC, LOCAL_ETC] {
            files.extend(system_ext_files(Path::new(root), name, registry));
        }
    }

    if let Some(home) = scope.home {
        files.extend(home_files(home, name));
        files.extend(home_ext_files(home, name, registry));
    }

    for ext in registry.extensions() {
        let file_name = format!(".{name}{RC_SUFFIX}{}", suffix(ext));
        if let Some(found) = find_upwards(scope.cwd, &file_name, fs) {
            files.push(found);
        }
    }

    dedup(files)
}

/// `<root>/<name>/config`, `<root>/<name>rc`, `<root>/<name>.conf`.
fn system_files(root: &Path, name: &str) -> [PathBuf; 3] {
    [
        root.join(name).join(CONFIG_FILE_STEM),
        root.join(format!("{name}{RC_SUFFIX}")),
        root.join(format!("{name}.conf")),
    ]
}

fn system_ext_files(root: &Path, name: &str, registry: &ParserRegistry) -> Vec<PathBuf> {
    registry
        .named_extensions()
        .flat_map(|ext| {
            let ext = suffix(ext);
            [
                root.join(name).join(format!("{CONFIG_FILE_STEM}{ext}")),
                root.join(format!("{name}{RC_SUFFIX}{ext}")),
            ]
        })
        .collect()
}

fn home_files(home: &Path, name: &str) -> [PathBuf; 4] {
    let xdg = home.join(".config");
    [
        xdg.join(name).join(CONFIG_FILE_STEM),
        xdg.join(name),
        home.join(format!(".{name}")).join(CONFIG_FILE_STEM),
        home.join(format!(".{name}{RC_SUFFIX}")),
    ]
}

fn home_ext_files(home: &Path, name: &str, registry: &ParserRegistry) -> Vec<PathBuf> {
    let xdg = home.join(".config");
    registry
        .named_extensions()
        .flat_map(|ext| {
            let ext = suffix(ext);
            [
                xdg.join(name).join(format!("{CONFIG_FILE_STEM}{ext}")),
                xdg.join(format!("{name}{ext}")),
                home.join(format!(".{name}")).join(format!("{CONFIG_FILE_STEM}{ext}")),
                home.join(format!(".{name}{RC_SUFFIX}{ext}")),
            ]
        })
        .collect()
}

/// Finds `file_name` in `start` or the nearest ancestor that contains it.
#[must_use]
pub fn find_upwards<F: FileSystem + ?Sized>(
    start: &Path,
    file_name: &str,
    fs: &F,
) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(file_name))
        .find(|candidate| fs.exists(candidate))
}

/// Removes repeated paths, keeping the first occurrence.
#[must_use]
pub fn dedup(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::with_capacity(paths.len());
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}
