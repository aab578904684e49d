//! Change sets between two revisions of the working tree's repository.

pub mod git;

pub use git::GitDiff;

use crate::result::Result;
use std::path::PathBuf;

/** Boundary to the version-control diff mechanism
 *
 * Implementations return the paths changed between `rev_a` and `rev_b`,
 * relative to the current working directory. Rejected revision arguments
 * must surface as `SealError::Revision` so callers can stop before any
 * compilation starts.
 */
#[allow(async_fn_in_trait)]
pub trait ChangeSource {
    async fn changed_paths(&self, rev_a: &str, rev_b: &str) -> Result<Vec<PathBuf>>;
}
