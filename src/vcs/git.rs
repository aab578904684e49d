use crate::result::{Result, SealError};
use crate::utils::process::{last_line, ProcessManager};
use crate::vcs::ChangeSource;
use std::path::{Path, PathBuf};

/// `git diff --name-only --relative` run in a fixed directory.
#[derive(Debug, Clone)]
pub struct GitDiff {
    work_dir: PathBuf,
    process: ProcessManager,
}

impl GitDiff {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            process: ProcessManager::new(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }
}

/// One path per non-empty line of `--name-only` output.
pub fn parse_name_only(stdout: &[u8]) -> Vec<PathBuf> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

impl ChangeSource for GitDiff {
    async fn changed_paths(&self, rev_a: &str, rev_b: &str) -> Result<Vec<PathBuf>> {
        let args = ["diff", "--name-only", "--relative", rev_a, rev_b, "--"];
        let output = self
            .process
            .output("git", args, Some(self.work_dir.as_path()))
            .await?;

        if !output.status.success() {
            let reason = last_line(&output.stderr).unwrap_or_default();
            log::error!(
                "git diff {} {} exited with {:?}: {}",
                rev_a,
                rev_b,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            );
            return Err(SealError::revision(format!(
                "cannot diff '{}' against '{}': {}",
                rev_a, rev_b, reason
            )));
        }

        let paths = parse_name_only(&output.stdout);
        log::info!("{} paths changed between {} and {}", paths.len(), rev_a, rev_b);
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn parses_one_path_per_line() {
        let out = b"app/views.py\nREADME.md\n\nlib/util.py\n";
        assert_eq!(
            parse_name_only(out),
            vec![
                PathBuf::from("app/views.py"),
                PathBuf::from("README.md"),
                PathBuf::from("lib/util.py"),
            ]
        );
    }

    #[test]
    fn empty_diff_is_empty() {
        assert!(parse_name_only(b"").is_empty());
    }

    #[tokio::test]
    async fn outside_a_repository_fails() {
        let dir = tempdir().unwrap();
        let git = GitDiff::new(dir.path());
        assert_eq!(git.work_dir(), dir.path());

        // Either git rejects the arguments or git is not installed at all.
        let err = git.changed_paths("HEAD~1", "HEAD").await.unwrap_err();
        assert!(matches!(err, SealError::Revision(_) | SealError::Process(_)));
    }
}
