pub mod cleanup;
pub mod config;
pub mod filter;
pub mod init;
pub mod orchestrator;
pub mod relocate;
pub mod walker;

pub use cleanup::clean_dirs;
pub use config::{FileSettings, Overrides, Settings, WordList};
pub use filter::IgnoreSet;
pub use init::{init_project, InitRequest};
pub use orchestrator::{BuildOrchestrator, BuildPlan, Summary};
pub use relocate::relocate;
pub use walker::{walk, WalkResult};

/// Extension of the files eligible for compilation.
pub const SOURCE_EXTENSION: &str = "py";

/// Directory the interpreter writes its bytecode cache into; never walked.
pub const CACHE_DIR_NAME: &str = "__pycache__";
