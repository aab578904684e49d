use crate::build::{relocate, walk, IgnoreSet, WalkResult};
use crate::compiler::Toolchain;
use crate::result::{Result, SealError};
use crate::utils::{absolutize, WorkingDir};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tokio::fs;

const RULE: &str = "--------------------------------------";

/// Inputs of one compile batch.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    /// Files or directories; relative entries are taken from `base_dir`.
    pub paths: Vec<PathBuf>,
    /// Where artifacts end up; relative to `base_dir` unless absolute.
    pub build_dir: PathBuf,
    /// Artifacts keep their position relative to this directory.
    pub base_dir: PathBuf,
    pub clean_source: bool,
    pub ignores: Vec<String>,
}

/// Outcome of one batch. Paths are absolute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub selected: Vec<PathBuf>,
    pub ignored: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    /// Final locations of the relocated artifacts.
    pub artifacts: Vec<PathBuf>,
    /// Artifacts left where the toolchain wrote them.
    pub unplaced: Vec<PathBuf>,
}

impl Summary {
    pub fn succeeded(&self) -> usize {
        self.selected.len() - self.failed.len()
    }

    pub fn report(&self) {
        println!("{}", RULE);
        println!("Compilation completed");
        println!(
            "Total {} files, {} compiled, {} failed",
            self.selected.len(),
            self.succeeded(),
            self.failed.len()
        );

        let sections = [
            ("Ignored", &self.ignored),
            ("Failed", &self.failed),
            ("Not relocated", &self.unplaced),
        ];
        for (title, paths) in sections {
            if paths.is_empty() {
                continue;
            }
            println!("{}", RULE);
            println!("{} {} files:", title, paths.len());
            for path in paths {
                println!("{}", path.display());
            }
        }
    }
}

/** Sequential compile pipeline over a resolved file set
 *
 * # Process Flow
 * 1. Resolve every root of the plan and union the results
 * 2. Compile each selected file on its own, inside its parent directory
 * 3. Remove the intermediate translation file after every attempt
 * 4. Move each produced artifact under the build directory
 *
 * # Error Handling
 * - A failing file is recorded in `Summary::failed`; the batch continues
 * - A source that cannot be removed after compiling is only logged, its
 *   artifact is still relocated
 * - Toolchain preparation, pattern and relocation errors abort the batch
 *
 * # Notes
 * - Files are compiled strictly one after another: each compile owns the
 *   process working directory for its duration
 */
pub struct BuildOrchestrator<T> {
    toolchain: T,
}

impl<T: Toolchain> BuildOrchestrator<T> {
    pub fn new(toolchain: T) -> Self {
        Self { toolchain }
    }

    pub fn toolchain(&self) -> &T {
        &self.toolchain
    }

    pub fn resolve(&self, plan: &BuildPlan) -> Result<WalkResult> {
        let ignores = IgnoreSet::new(&plan.ignores)?;
        let mut files = WalkResult::default();

        for path in &plan.paths {
            let root = absolutize(&plan.base_dir, path);
            files.merge(walk(&root, &ignores));
        }

        Ok(files)
    }

    pub async fn run(&self, plan: &BuildPlan) -> Result<Summary> {
        let files = self.resolve(plan)?;
        let mut summary = Summary {
            selected: files.selected.into_iter().collect(),
            ignored: files.ignored.into_iter().collect(),
            ..Summary::default()
        };

        log::info!(
            "Compiling {} files ({} ignored) into {}",
            summary.selected.len(),
            summary.ignored.len(),
            plan.build_dir.display()
        );

        if summary.selected.is_empty() {
            return Ok(summary);
        }

        println!("{}", RULE);
        println!("Total {} files", summary.selected.len());
        self.toolchain.prepare().await?;

        let progress = ProgressBar::new(summary.selected.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut produced = Vec::new();
        for source in &summary.selected {
            progress.set_message(source.display().to_string());

            match self.compile_one(source, plan.clean_source).await {
                Ok(artifact) => produced.push(artifact),
                Err(e) => {
                    log::warn!("Failed to compile {}: {}", source.display(), e);
                    progress.println(format!("Failed: {}", e));
                    summary.failed.push(source.clone());
                }
            }

            self.remove_intermediate(source).await;
            progress.inc(1);
        }
        progress.finish_and_clear();

        let build_dir = absolutize(&plan.base_dir, &plan.build_dir);
        for artifact in produced {
            match relocate(&artifact, &build_dir, &plan.base_dir).await {
                Ok(destination) => summary.artifacts.push(destination),
                Err(SealError::NotFound(msg)) => {
                    log::warn!("Artifact left in place: {}", msg);
                    summary.unplaced.push(artifact);
                }
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "Batch finished: {} compiled, {} failed",
            summary.succeeded(),
            summary.failed.len()
        );

        Ok(summary)
    }

    async fn compile_one(&self, source: &Path, clean_source: bool) -> Result<PathBuf> {
        let parent = source.parent().ok_or_else(|| {
            SealError::not_found(format!("{} has no parent directory", source.display()))
        })?;

        let _cwd = WorkingDir::enter(parent).await?;
        let artifact = absolutize(parent, &self.toolchain.compile(source).await?);

        if clean_source {
            if let Err(e) = fs::remove_file(source).await {
                log::warn!("Compiled {} but could not remove it: {}", source.display(), e);
            }
        }

        Ok(artifact)
    }

    async fn remove_intermediate(&self, source: &Path) {
        let intermediate = self.toolchain.intermediate_for(source);
        match fs::remove_file(&intermediate).await {
            Ok(()) => log::debug!("Removed {}", intermediate.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!("Could not remove {}: {}", intermediate.display(), e),
        }
    }
}
