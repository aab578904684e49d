use std::borrow::Cow;
use thiserror::Error;

/** Main Result type alias for pyseal operations
 *
 * # Usage
 * ```no_run
 * use pyseal::result::Result;
 *
 * fn read_source(path: &str) -> Result<String> {
 *     // Function automatically propagates SealError
 *     Ok(std::fs::read_to_string(path)?)
 * }
 * ```
 */
pub type Result<T> = std::result::Result<T, SealError>;

/** Error enumeration for the pyseal build helper
 *
 * # Error Categories
 * - **Io**: File system and I/O operations
 * - **Process**: External process could not be started or awaited
 * - **Config**: Invalid settings or ignore patterns
 * - **NotFound**: Missing interpreter, source directory or input path
 * - **Compile**: A single source file failed to compile (recovered per file)
 * - **Revision**: Version control rejected the revision arguments
 * - **Aborted**: The user declined a destructive operation
 *
 * # Design Notes
 * - Uses `Cow<'static, str>` so static messages never allocate
 * - Automatic From implementations for the third-party error types
 */
#[derive(Error, Debug)]
pub enum SealError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Process error: {0}")]
    Process(Cow<'static, str>),

    #[error("Config error: {0}")]
    Config(Cow<'static, str>),

    #[error("Not found: {0}")]
    NotFound(Cow<'static, str>),

    #[error("Compile error: {0}")]
    Compile(Cow<'static, str>),

    #[error("Invalid revisions: {0}")]
    Revision(Cow<'static, str>),

    #[error("Aborted: {0}")]
    Aborted(Cow<'static, str>),

    #[error("Invalid ignore pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid copy-ignore glob: {0}")]
    Glob(#[from] globset::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl SealError {
    pub const INTERPRETER_NOT_FOUND: &'static str = "Python interpreter not found";
    pub const DECLINED: &'static str = "existing build directory was kept";

    pub fn process(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Process(msg.into())
    }

    pub fn config(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Config(msg.into())
    }

    pub fn not_found(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(msg.into())
    }

    /** Creates a Compile error for one source file
     *
     * # Use Cases
     * - Toolchain exited with a non-zero status
     * - Toolchain did not report the produced artifact
     * - Reported artifact does not exist on disk
     */
    pub fn compile(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Compile(msg.into())
    }

    pub fn revision(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Revision(msg.into())
    }

    pub fn aborted(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::Aborted(msg.into())
    }
}
