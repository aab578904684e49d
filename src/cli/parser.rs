use crate::result::{Result, SealError};
use std::path::{Path, PathBuf};

pub struct CliParser;

impl CliParser {
    pub fn validate_source_dir(path: &Path) -> Result<PathBuf> {
        if !path.exists() {
            return Err(SealError::NotFound(
                format!("Source directory not found: {}", path.display()).into(),
            ));
        }

        if !path.is_dir() {
            return Err(SealError::Config(
                format!("Source path is not a directory: {}", path.display()).into(),
            ));
        }

        Ok(path.to_path_buf())
    }

    /// Collapses a `--clean-source` / `--keep-source` pair into a tri-state.
    pub fn clean_source_flag(clean: bool, keep: bool) -> Option<bool> {
        match (clean, keep) {
            (true, _) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
        }
    }

    /// Repeatable flags given zero times mean "not provided".
    pub fn repeated<T>(values: Vec<T>) -> Option<Vec<T>> {
        if values.is_empty() {
            None
        } else {
            Some(values)
        }
    }
}
