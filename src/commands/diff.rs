use crate::build::{BuildOrchestrator, Settings, Summary};
use crate::commands::run::{compile, plan_for};
use crate::compiler::{CythonToolchain, Toolchain};
use crate::result::Result;
use crate::vcs::{ChangeSource, GitDiff};
use std::path::Path;

/// Compiles exactly the files reported by `changes`; nothing is compiled
/// when the change set cannot be resolved. Reported paths that are not
/// regular files (deletions, submodules) are dropped, never expanded.
pub async fn compile_changes<C, T>(
    changes: &C,
    orchestrator: &BuildOrchestrator<T>,
    base_dir: &Path,
    settings: &Settings,
    rev_a: &str,
    rev_b: &str,
) -> Result<Summary>
where
    C: ChangeSource,
    T: Toolchain,
{
    let paths = changes.changed_paths(rev_a, rev_b).await?;
    if paths.is_empty() {
        println!("No files changed between {} and {}", rev_a, rev_b);
        return Ok(Summary::default());
    }

    let mut plan = plan_for(base_dir, settings);
    plan.paths = paths
        .into_iter()
        .filter(|path| {
            let keep = base_dir.join(path).is_file();
            if !keep {
                log::debug!("Skipping changed path {}: not a file", path.display());
            }
            keep
        })
        .collect();
    compile(orchestrator, &plan).await
}

pub async fn execute(
    base_dir: &Path,
    settings: &Settings,
    rev_a: &str,
    rev_b: &str,
) -> Result<Summary> {
    let changes = GitDiff::new(base_dir);
    let orchestrator = BuildOrchestrator::new(CythonToolchain::new(&settings.python));
    compile_changes(&changes, &orchestrator, base_dir, settings, rev_a, rev_b).await
}
