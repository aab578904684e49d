use crate::result::Result;
use std::path::{Path, PathBuf};

/** Boundary to the external ahead-of-time compiler
 *
 * # Contract
 * - `prepare` runs once per batch, before the first `compile`, and fails
 *   fast when the toolchain is unusable
 * - `compile` builds one source file in isolation and returns the path of
 *   the produced artifact; the caller has already switched the working
 *   directory to the file's parent
 * - `intermediate_for` names the translation file a compile leaves next to
 *   the source; the caller removes it whether or not `compile` succeeded
 */
#[allow(async_fn_in_trait)]
pub trait Toolchain {
    async fn prepare(&self) -> Result<()> {
        Ok(())
    }

    async fn compile(&self, source: &Path) -> Result<PathBuf>;

    fn intermediate_for(&self, source: &Path) -> PathBuf {
        source.with_extension("c")
    }
}
