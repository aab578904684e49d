use crate::build::walker::readable;
use crate::result::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/** Deletes every directory named in `names` below each root
 *
 * # Returns
 * The directories that were removed, in walk order.
 *
 * # Notes
 * - Matching directories are not descended into, so nested matches are
 *   removed together with their parent and reported once
 * - Missing roots are skipped; a second call on the same tree therefore
 *   finds nothing and returns an empty list
 * - A root whose own name matches is removed as well
 * - Unreadable entries are skipped with a warning
 */
pub fn clean_dirs(roots: &[PathBuf], names: &[&str]) -> Result<Vec<PathBuf>> {
    let mut matched = Vec::new();

    for root in roots {
        if !root.is_dir() {
            log::debug!("Skipping missing clean root {}", root.display());
            continue;
        }

        let mut walker = WalkDir::new(root).into_iter();
        while let Some(entry) = walker.next() {
            let Some(entry) = readable(entry) else {
                continue;
            };
            if !entry.file_type().is_dir() {
                continue;
            }
            if is_named(entry.path(), names) {
                matched.push(entry.into_path());
                walker.skip_current_dir();
            }
        }
    }

    for dir in &matched {
        std::fs::remove_dir_all(dir)?;
        log::info!("Deleted {}", dir.display());
    }

    Ok(matched)
}

fn is_named(path: &Path, names: &[&str]) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| names.contains(&name))
}
