use crate::build::{clean_dirs, Settings, CACHE_DIR_NAME};
use crate::result::Result;
use crate::utils::absolutize;
use std::path::{Path, PathBuf};

/// Removes build output and bytecode caches under `dirs`, or under
/// `base_dir` when no directory is given.
pub fn execute(base_dir: &Path, settings: &Settings, dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let roots: Vec<PathBuf> = if dirs.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        dirs.iter().map(|dir| absolutize(base_dir, dir)).collect()
    };

    let build_name = settings
        .build_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    let mut names = vec![CACHE_DIR_NAME];
    if let Some(name) = build_name.as_deref() {
        names.push(name);
    }

    println!("Cleaning {:?} under {} roots", names, roots.len());
    let deleted = clean_dirs(&roots, &names)?;

    println!("Clean up done, deleted {} dirs", deleted.len());
    for dir in &deleted {
        println!("{}", dir.display());
    }

    Ok(deleted)
}
