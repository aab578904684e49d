use crate::compiler::Toolchain;
use crate::result::{Result, SealError};
use crate::utils::process::{last_line, ProcessManager};
use once_cell::sync::OnceCell;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Builds one module in place with a throw-away build_temp directory and
/// prints the absolute path of the extension it produced.
///
/// argv: source, build_temp, language_level
const BUILD_SCRIPT: &str = r#"
import os
import sys

from Cython.Build import cythonize
from setuptools import setup
from setuptools.command.build_py import build_py

build_py.get_package_dir = lambda *args: ""

source, build_temp, level = sys.argv[1], sys.argv[2], int(sys.argv[3])
dist = setup(
    ext_modules=cythonize([source], quiet=True, language_level=level),
    script_args=["-q", "build_ext", "-t", build_temp, "--inplace"],
)
build_ext = dist.get_command_obj("build_ext")
print(os.path.abspath(build_ext.get_ext_fullpath(dist.ext_modules[0].name)))
"#;

const PROBE_SCRIPT: &str = "import Cython, setuptools";

const LANGUAGE_LEVEL: &str = "3";

/** Cython + setuptools driven through a Python interpreter
 *
 * # Process Flow
 * 1. `prepare` locates the interpreter on `PATH` and checks that Cython and
 *    setuptools import
 * 2. `compile` runs the embedded build script for a single file with a
 *    fresh temporary build directory
 * 3. The last stdout line of the script is taken as the artifact path
 *
 * # Notes
 * - The generated `.c` file is left for the caller to remove
 * - The interpreter lookup is cached after the first `prepare`
 */
#[derive(Debug)]
pub struct CythonToolchain {
    interpreter: String,
    resolved: OnceCell<PathBuf>,
    process: ProcessManager,
}

impl CythonToolchain {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
            resolved: OnceCell::new(),
            process: ProcessManager::new(),
        }
    }

    fn resolve(&self) -> Result<&PathBuf> {
        self.resolved
            .get_or_try_init(|| self.process.find_executable(&self.interpreter))
            .map_err(|_| {
                SealError::not_found(format!(
                    "{}: {}",
                    SealError::INTERPRETER_NOT_FOUND,
                    self.interpreter
                ))
            })
    }
}

impl Toolchain for CythonToolchain {
    async fn prepare(&self) -> Result<()> {
        let python = self.resolve()?;
        log::info!("Using interpreter: {}", python.display());

        let output = self.process.output(python, ["-c", PROBE_SCRIPT], None).await?;
        if !output.status.success() {
            return Err(SealError::not_found(format!(
                "Cython and setuptools must be importable by {}: {}",
                python.display(),
                last_line(&output.stderr).unwrap_or_default()
            )));
        }

        Ok(())
    }

    async fn compile(&self, source: &Path) -> Result<PathBuf> {
        let python = self.resolve()?;
        let build_temp = tempfile::Builder::new().prefix("pyseal-").tempdir()?;

        let args: [&OsStr; 5] = [
            OsStr::new("-c"),
            OsStr::new(BUILD_SCRIPT),
            source.as_os_str(),
            build_temp.path().as_os_str(),
            OsStr::new(LANGUAGE_LEVEL),
        ];
        let output = self.process.output(python, args, source.parent()).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::error!("Compiling {} failed:\n{}", source.display(), stderr);
            return Err(SealError::compile(format!(
                "{} (exit code {}): {}",
                source.display(),
                output.status.code().unwrap_or(-1),
                last_line(&output.stderr).unwrap_or_default()
            )));
        }

        let artifact = last_line(&output.stdout)
            .map(PathBuf::from)
            .ok_or_else(|| {
                SealError::compile(format!("{}: no artifact reported", source.display()))
            })?;

        if !artifact.is_file() {
            return Err(SealError::compile(format!(
                "{}: reported artifact {} does not exist",
                source.display(),
                artifact.display()
            )));
        }

        Ok(artifact)
    }
}
