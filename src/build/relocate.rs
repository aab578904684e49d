use crate::build::SOURCE_EXTENSION;
use crate::result::{Result, SealError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Module name of an artifact: the file name up to its first `.`, so
/// `views.cpython-312-x86_64-linux-gnu.so` belongs to `views`.
fn module_name(artifact: &Path) -> Option<&str> {
    let name = artifact.file_name()?.to_str()?;
    name.split('.').next().filter(|stem| !stem.is_empty())
}

/** Moves a compiled artifact under the build directory
 *
 * # Arguments
 * * `artifact` - Path of the freshly built extension module
 * * `build_dir` - Root the artifact is moved under
 * * `base_dir` - Directory the artifact's relative position is taken from
 *
 * # Returns
 * The destination path. When it equals `artifact` (in-place builds) nothing
 * is moved.
 *
 * # Behavior
 * - Missing destination directories are created first
 * - An existing file at the destination is overwritten
 * - A source file with the artifact's module name in the destination
 *   directory is removed so it cannot shadow the compiled module
 *
 * # Errors
 * - `NotFound` when `artifact` is not below `base_dir`
 * - `Io` for failed directory creation, rename or removal
 */
pub async fn relocate(artifact: &Path, build_dir: &Path, base_dir: &Path) -> Result<PathBuf> {
    let relative = artifact.strip_prefix(base_dir).map_err(|_| {
        SealError::not_found(format!(
            "{} is outside of {}",
            artifact.display(),
            base_dir.display()
        ))
    })?;
    let destination = build_dir.join(relative);

    if destination == artifact {
        return Ok(destination);
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).await?;
    }

    move_file(artifact, &destination).await?;

    if let (Some(parent), Some(module)) = (destination.parent(), module_name(&destination)) {
        let stale = parent.join(format!("{}.{}", module, SOURCE_EXTENSION));
        if fs::try_exists(&stale).await? {
            log::info!("Removing stale source {}", stale.display());
            fs::remove_file(&stale).await?;
        }
    }

    log::debug!("Relocated {} -> {}", artifact.display(), destination.display());
    Ok(destination)
}

async fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Err(rename_err) = fs::rename(from, to).await {
        // Renames cannot cross filesystems; copy and remove instead.
        log::debug!("Rename of {} failed: {}", from.display(), rename_err);
        fs::copy(from, to).await.map_err(|_| rename_err)?;
        fs::remove_file(from).await?;
    }
    Ok(())
}
