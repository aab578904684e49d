use crate::build::{BuildOrchestrator, BuildPlan, Summary};
use crate::compiler::Toolchain;
use crate::result::{Result, SealError};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// First-run request: copy `src` to `build_dir`, then compile the copy.
#[derive(Debug, Clone)]
pub struct InitRequest {
    /// Absolute source directory.
    pub src: PathBuf,
    /// Absolute destination; becomes the output location.
    pub build_dir: PathBuf,
    /// Roots to compile, relative to `build_dir`.
    pub paths: Vec<PathBuf>,
    pub copy_ignores: Vec<String>,
    pub ignores: Vec<String>,
}

/** Copies a project into a fresh build directory and compiles it in place
 *
 * # Process Flow
 * 1. An existing `build_dir` is only replaced after `confirm` agrees;
 *    declining returns `SealError::Aborted` with the directory untouched
 * 2. `src` is copied recursively, skipping entries matched by a copy glob
 * 3. The copy is compiled with its sources removed afterwards, artifacts
 *    staying where their sources were
 *
 * # Errors
 * - `NotFound` when `src` is not a directory
 * - `Config` when `build_dir` is `src` or one of its ancestors
 * - `Glob` for malformed copy globs, checked before anything is deleted
 */
pub async fn init_project<T, F>(
    orchestrator: &BuildOrchestrator<T>,
    request: &InitRequest,
    confirm: F,
) -> Result<Summary>
where
    T: Toolchain,
    F: FnOnce(&Path) -> Result<bool>,
{
    let src = &request.src;
    let build_dir = &request.build_dir;

    if !src.is_dir() {
        return Err(SealError::not_found(format!(
            "Source directory not found: {}",
            src.display()
        )));
    }
    if src.starts_with(build_dir) {
        return Err(SealError::config(format!(
            "Build directory {} would overwrite the source {}",
            build_dir.display(),
            src.display()
        )));
    }

    let excludes = build_globs(&request.copy_ignores)?;

    if fs::symlink_metadata(build_dir).is_ok() {
        if !confirm(build_dir.as_path())? {
            log::warn!("Init declined, keeping {}", build_dir.display());
            return Err(SealError::aborted(SealError::DECLINED));
        }
        remove_path(build_dir)?;
        log::info!("Removed existing {}", build_dir.display());
    }

    let copied = copy_tree(src, build_dir, &excludes)?;
    println!(
        "Copied {} files from {} to {}",
        copied,
        src.display(),
        build_dir.display()
    );

    let plan = BuildPlan {
        paths: request.paths.clone(),
        build_dir: build_dir.clone(),
        base_dir: build_dir.clone(),
        clean_source: true,
        ignores: request.ignores.clone(),
    };
    orchestrator.run(&plan).await
}

fn build_globs(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

fn remove_path(path: &Path) -> Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}

fn is_excluded(entry: &DirEntry, src: &Path, excludes: &GlobSet) -> bool {
    let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
    excludes.is_match(entry.file_name()) || excludes.is_match(relative)
}

/// Returns the number of files copied.
fn copy_tree(src: &Path, dst: &Path, excludes: &GlobSet) -> Result<u64> {
    let walker = WalkDir::new(src).into_iter().filter_entry(|entry| {
        entry.depth() == 0 || !(entry.path() == dst || is_excluded(entry, src, excludes))
    });

    let mut copied = 0;
    for entry in walker {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.path().is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        } else {
            log::warn!("Not copying {}", entry.path().display());
        }
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::testing::{FakeToolchain, ARTIFACT_TAG};
    use tempfile::tempdir;

    fn write(path: &Path, text: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    fn request(src: &Path, build_dir: &Path) -> InitRequest {
        InitRequest {
            src: src.to_path_buf(),
            build_dir: build_dir.to_path_buf(),
            paths: vec![PathBuf::from(".")],
            copy_ignores: vec!["venv".to_string(), "*.log".to_string()],
            ignores: vec!["settings".to_string()],
        }
    }

    fn project() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        write(&src.join("app/views.py"), "v = 1\n");
        write(&src.join("app/settings.py"), "DEBUG = False\n");
        write(&src.join("app/templates/index.html"), "<html/>");
        write(&src.join("venv/lib/site.py"), "x\n");
        write(&src.join("server.log"), "log");
        dir
    }

    #[tokio::test]
    async fn copies_and_compiles_in_place() {
        let dir = project();
        let src = dir.path().join("src");
        let out = dir.path().join("out");
        let orchestrator = BuildOrchestrator::new(FakeToolchain::default());

        let summary = init_project(&orchestrator, &request(&src, &out), |_| {
            panic!("no confirmation needed for a fresh directory")
        })
        .await
        .unwrap();

        assert_eq!(summary.selected, vec![out.join("app/views.py")]);
        assert_eq!(summary.ignored, vec![out.join("app/settings.py")]);
        assert!(out.join(format!("app/views.{}", ARTIFACT_TAG)).is_file());
        assert!(!out.join("app/views.py").exists());
        assert!(!out.join("app/views.c").exists());
        assert!(out.join("app/settings.py").is_file());
        assert!(out.join("app/templates/index.html").is_file());
        assert!(!out.join("venv").exists());
        assert!(!out.join("server.log").exists());
        // The original tree is untouched.
        assert!(src.join("app/views.py").is_file());
    }

    #[tokio::test]
    async fn declining_keeps_existing_directory() {
        let dir = project();
        let src = dir.path().join("src");
        let out = dir.path().join("out");
        write(&out.join("precious.txt"), "keep me");

        let orchestrator = BuildOrchestrator::new(FakeToolchain::default());
        let err = init_project(&orchestrator, &request(&src, &out), |_| Ok(false))
            .await
            .unwrap_err();

        assert!(matches!(err, SealError::Aborted(_)));
        assert_eq!(fs::read_to_string(out.join("precious.txt")).unwrap(), "keep me");
        assert_eq!(fs::read_dir(&out).unwrap().count(), 1);
        assert!(orchestrator.toolchain().compiled().is_empty());
    }

    #[tokio::test]
    async fn confirming_replaces_existing_directory() {
        let dir = project();
        let src = dir.path().join("src");
        let out = dir.path().join("out");
        write(&out.join("stale.txt"), "old");

        let orchestrator = BuildOrchestrator::new(FakeToolchain::default());
        let mut asked = None;
        init_project(&orchestrator, &request(&src, &out), |path| {
            asked = Some(path.to_path_buf());
            Ok(true)
        })
        .await
        .unwrap();

        assert_eq!(asked, Some(out.clone()));
        assert!(!out.join("stale.txt").exists());
        assert!(out.join("app/templates/index.html").is_file());
    }

    #[tokio::test]
    async fn build_dir_inside_source_is_not_copied_into_itself() {
        let dir = project();
        let src = dir.path().join("src");
        let out = src.join("build");

        let orchestrator = BuildOrchestrator::new(FakeToolchain::default());
        init_project(&orchestrator, &request(&src, &out), |_| Ok(true))
            .await
            .unwrap();

        assert!(out.join("app/templates/index.html").is_file());
        assert!(!out.join("build").exists());
    }

    #[tokio::test]
    async fn refuses_to_replace_the_source_itself() {
        let dir = project();
        let src = dir.path().join("src");

        let orchestrator = BuildOrchestrator::new(FakeToolchain::default());
        for target in [src.clone(), dir.path().to_path_buf()] {
            let err = init_project(&orchestrator, &request(&src, &target), |_| Ok(true))
                .await
                .unwrap_err();
            assert!(matches!(err, SealError::Config(_)));
        }
        assert!(src.join("app/views.py").is_file());
    }

    #[tokio::test]
    async fn bad_glob_fails_before_deleting() {
        let dir = project();
        let src = dir.path().join("src");
        let out = dir.path().join("out");
        write(&out.join("precious.txt"), "keep me");

        let mut req = request(&src, &out);
        req.copy_ignores = vec!["[".to_string()];

        let orchestrator = BuildOrchestrator::new(FakeToolchain::default());
        let err = init_project(&orchestrator, &req, |_| Ok(true)).await.unwrap_err();

        assert!(matches!(err, SealError::Glob(_)));
        assert!(out.join("precious.txt").is_file());
    }
}
