use crate::result::Result;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, MutexGuard};

// The working directory is process-global state.
static CWD_LOCK: Mutex<()> = Mutex::const_new(());

/** Scoped switch of the process working directory
 *
 * # Behavior
 * - `enter` waits for exclusive ownership of the working directory, records
 *   the current one and switches into `dir`
 * - Dropping the guard switches back, whichever way the scope is left
 *   (normal return, `?` propagation, or a panic unwinding through it)
 *
 * # Example
 * ```no_run
 * use pyseal::utils::WorkingDir;
 * use std::path::Path;
 *
 * # async fn demo() -> pyseal::result::Result<()> {
 * {
 *     let _cwd = WorkingDir::enter(Path::new("/tmp")).await?;
 *     // relative paths now resolve against /tmp
 * }
 * // previous directory restored here
 * # Ok(())
 * # }
 * ```
 */
pub struct WorkingDir {
    previous: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl WorkingDir {
    pub async fn enter(dir: &Path) -> Result<Self> {
        let lock = CWD_LOCK.lock().await;
        let previous = std::env::current_dir()?;
        std::env::set_current_dir(dir)?;
        log::debug!("Entered {} (from {})", dir.display(), previous.display());

        Ok(Self {
            previous,
            _lock: lock,
        })
    }

    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        // Runs before `_lock` is released.
        if let Err(e) = std::env::set_current_dir(&self.previous) {
            log::error!(
                "Failed to restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}
