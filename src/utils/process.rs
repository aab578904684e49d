use crate::result::{Result, SealError};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use tokio::process::Command;
use which::which;

/// Thin wrapper around external process execution shared by the toolchain
/// and the version-control adapters.
#[derive(Default, Debug, Clone, Copy)]
pub struct ProcessManager;

impl ProcessManager {
    pub fn new() -> Self {
        Self
    }

    pub fn find_executable(&self, name: &str) -> Result<PathBuf> {
        match which(name) {
            Ok(path) => Ok(path),
            Err(_) => Err(SealError::NotFound(
                format!("Executable not found: {}", name).into(),
            )),
        }
    }

    /** Runs a program to completion with captured stdout and stderr
     *
     * # Arguments
     * * `program` - Executable name or path
     * * `args` - Arguments passed verbatim
     * * `current_dir` - Working directory of the child, inherited when `None`
     *
     * # Returns
     * - The raw `Output`, whatever the exit status was
     * - `SealError::Process` if the child could not be spawned or awaited
     *
     * # Notes
     * - Stdin is closed so a child can never block on input
     * - The caller decides what a non-zero exit status means
     */
    pub async fn output<I, S>(
        &self,
        program: impl AsRef<OsStr>,
        args: I,
        current_dir: Option<&Path>,
    ) -> Result<Output>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program = program.as_ref();
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        if let Some(dir) = current_dir {
            cmd.current_dir(dir);
        }

        log::debug!("Running {:?}", cmd.as_std());

        cmd.output().await.map_err(|e| {
            SealError::process(format!(
                "Failed to execute {}: {}",
                program.to_string_lossy(),
                e
            ))
        })
    }
}

/// Last non-empty line of a process stream, trimmed.
pub fn last_line(bytes: &[u8]) -> Option<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .rev()
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_line_skips_trailing_blank_lines() {
        let out = b"running build_ext\n/tmp/pkg/mod.cpython-312.so\n\n  \n";
        assert_eq!(last_line(out).as_deref(), Some("/tmp/pkg/mod.cpython-312.so"));
    }

    #[test]
    fn last_line_of_empty_stream_is_none() {
        assert_eq!(last_line(b""), None);
        assert_eq!(last_line(b"\n\n"), None);
    }

    #[test]
    fn missing_executable_is_not_found() {
        let err = ProcessManager::new()
            .find_executable("pyseal-definitely-not-installed-binary")
            .unwrap_err();
        assert!(matches!(err, SealError::NotFound(_)));
    }

    #[tokio::test]
    async fn spawn_failure_is_process_error() {
        let err = ProcessManager::new()
            .output("pyseal-definitely-not-installed-binary", ["--version"], None)
            .await
            .unwrap_err();
        assert!(matches!(err, SealError::Process(_)));
    }
}
