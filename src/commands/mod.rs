pub mod clean;
pub mod diff;
pub mod init;
pub mod run;

use crate::build::{FileSettings, Overrides, Settings};
use crate::result::Result;
use std::path::{Path, PathBuf};

/** Shared context of every subcommand
 *
 * Captures the working directory once and loads the file-backed settings
 * layer from the config path, so each command only supplies its overrides.
 */
pub struct CommandExecutor {
    base_dir: PathBuf,
    file: FileSettings,
}

impl CommandExecutor {
    pub async fn new(config_path: &Path) -> Result<Self> {
        let base_dir = std::env::current_dir()?;
        let file = FileSettings::load_or_default(&base_dir.join(config_path)).await;
        Ok(Self { base_dir, file })
    }

    pub fn settings(&self, overrides: &Overrides) -> Settings {
        Settings::resolve(&self.file, overrides)
    }

    pub async fn run_paths(&self, overrides: Overrides) -> Result<()> {
        let settings = self.settings(&overrides);
        run::execute(&self.base_dir, &settings).await.map(|_| ())
    }

    pub async fn init_project(
        &self,
        src: &Path,
        overrides: Overrides,
        assume_yes: bool,
    ) -> Result<()> {
        let settings = self.settings(&overrides);
        init::execute(&self.base_dir, &settings, src, assume_yes)
            .await
            .map(|_| ())
    }

    pub async fn compile_diff(
        &self,
        rev_a: &str,
        rev_b: &str,
        overrides: Overrides,
    ) -> Result<()> {
        let settings = self.settings(&overrides);
        diff::execute(&self.base_dir, &settings, rev_a, rev_b)
            .await
            .map(|_| ())
    }

    pub fn clean(&self, dirs: &[PathBuf], overrides: Overrides) -> Result<()> {
        let settings = self.settings(&overrides);
        clean::execute(&self.base_dir, &settings, dirs).map(|_| ())
    }
}
