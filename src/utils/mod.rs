pub mod paths;
pub mod process;
pub mod workdir;

pub use paths::absolutize;
pub use process::ProcessManager;
pub use workdir::WorkingDir;
