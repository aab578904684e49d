use crate::build::{BuildOrchestrator, BuildPlan, Settings, Summary};
use crate::compiler::{CythonToolchain, Toolchain};
use crate::result::Result;
use std::path::Path;

pub fn plan_for(base_dir: &Path, settings: &Settings) -> BuildPlan {
    BuildPlan {
        paths: settings.paths.clone(),
        build_dir: settings.build_dir.clone(),
        base_dir: base_dir.to_path_buf(),
        clean_source: settings.clean_source,
        ignores: settings.ignores.clone(),
    }
}

/// Prints the end-of-run summary. Failed files never change the outcome.
pub fn compile_report(summary: &Summary) {
    summary.report();

    match summary.failed.len() {
        0 => log::info!("Compiled {} files", summary.succeeded()),
        n => log::warn!("{} of {} files failed", n, summary.selected.len()),
    }
}

pub async fn compile<T: Toolchain>(
    orchestrator: &BuildOrchestrator<T>,
    plan: &BuildPlan,
) -> Result<Summary> {
    let summary = orchestrator.run(plan).await?;
    compile_report(&summary);
    Ok(summary)
}

pub async fn execute(base_dir: &Path, settings: &Settings) -> Result<Summary> {
    log::info!("Compiling paths {:?}", settings.paths);
    let orchestrator = BuildOrchestrator::new(CythonToolchain::new(&settings.python));
    compile(&orchestrator, &plan_for(base_dir, settings)).await
}
