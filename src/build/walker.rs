use crate::build::{IgnoreSet, CACHE_DIR_NAME, SOURCE_EXTENSION};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Files found under one or more roots, split by the ignore patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkResult {
    pub selected: BTreeSet<PathBuf>,
    pub ignored: BTreeSet<PathBuf>,
}

impl WalkResult {
    /// Set union; a path seen under several roots is kept once.
    pub fn merge(&mut self, other: WalkResult) {
        self.selected.extend(other.selected);
        self.ignored.extend(other.ignored);
    }

    fn classify(&mut self, path: PathBuf, ignores: &IgnoreSet) {
        if ignores.matches(&path.to_string_lossy()) {
            self.ignored.insert(path);
        } else {
            self.selected.insert(path);
        }
    }
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

fn is_cache_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == CACHE_DIR_NAME
}

fn in_cache_dir(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == CACHE_DIR_NAME))
}

/// Unwraps one walk entry; unreadable entries are logged and skipped.
pub(crate) fn readable(entry: walkdir::Result<DirEntry>) -> Option<DirEntry> {
    match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
            log::warn!("Skipping unreadable entry: {}", e);
            None
        }
    }
}

/** Resolves one root into selected and ignored source files
 *
 * # Behavior
 * - A file root is classified on its own; files without the source
 *   extension land in neither set
 * - A directory root is walked recursively; bytecode cache directories are
 *   pruned and never descended into
 * - A root that does not exist, or that lies inside a cache directory,
 *   yields an empty result
 * - Entries that cannot be read are skipped with a warning
 *
 * # Notes
 * - Paths are reported exactly as walked below `root`, so an absolute root
 *   gives absolute paths, which is what the ignore patterns are matched on
 * - Symlinks are not followed
 */
pub fn walk(root: &Path, ignores: &IgnoreSet) -> WalkResult {
    let mut result = WalkResult::default();

    if in_cache_dir(root) {
        log::debug!("Skipping cache path {}", root.display());
        return result;
    }

    if root.is_file() {
        if is_source_file(root) {
            result.classify(root.to_path_buf(), ignores);
        }
        return result;
    }

    if !root.is_dir() {
        log::warn!("Input path does not exist: {}", root.display());
        return result;
    }

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_cache_dir(entry));

    for entry in walker.filter_map(readable) {
        if entry.file_type().is_file() && is_source_file(entry.path()) {
            result.classify(entry.into_path(), ignores);
        }
    }

    log::debug!(
        "Walked {}: {} selected, {} ignored",
        root.display(),
        result.selected.len(),
        result.ignored.len()
    );

    result
}
