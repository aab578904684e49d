use crate::compiler::Toolchain;
use crate::result::{Result, SealError};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Sources containing this marker fail to compile.
pub const BROKEN: &str = "syntax error";

/// Sources containing this marker delete themselves while compiling.
pub const VANISH: &str = "vanish";

pub const ARTIFACT_TAG: &str = "cpython-test-x86_64-linux-gnu.so";

/// Writes `<stem>.c` next to every source, then `<stem>.<tag>` unless the
/// source contains [`BROKEN`]. Records the working directory of each call.
#[derive(Debug, Default)]
pub struct FakeToolchain {
    pub calls: Mutex<Vec<(PathBuf, PathBuf)>>,
    pub prepared: Mutex<u32>,
}

impl FakeToolchain {
    pub fn artifact_for(source: &Path) -> PathBuf {
        let stem = source.file_stem().unwrap().to_string_lossy();
        source.with_file_name(format!("{}.{}", stem, ARTIFACT_TAG))
    }

    pub fn compiled(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().iter().map(|(s, _)| s.clone()).collect()
    }
}

impl Toolchain for FakeToolchain {
    async fn prepare(&self) -> Result<()> {
        *self.prepared.lock().unwrap() += 1;
        Ok(())
    }

    async fn compile(&self, source: &Path) -> Result<PathBuf> {
        let cwd = std::env::current_dir()?;
        self.calls
            .lock()
            .unwrap()
            .push((source.to_path_buf(), cwd));

        let text = std::fs::read_to_string(source)?;
        std::fs::write(self.intermediate_for(source), "/* generated */")?;
        if text.contains(BROKEN) {
            return Err(SealError::compile(format!("{}: {}", source.display(), BROKEN)));
        }

        let artifact = Self::artifact_for(source);
        std::fs::write(&artifact, format!("compiled {}", source.display()))?;
        if text.contains(VANISH) {
            std::fs::remove_file(source)?;
        }
        Ok(artifact)
    }
}
