//! pyseal - compile Python source trees into native extension modules
//!
//! Sources are compiled one file at a time with Cython, the resulting
//! extension modules are moved under a build directory and the generated C
//! files are removed. Only files changed between two git revisions can be
//! selected instead of whole trees.
//!
//! Main modules:
//! - build: File selection, the compile pipeline, init and clean
//! - cli: Command-line interface parsing and execution
//! - commands: Implementation of the subcommands
//! - compiler: Toolchain abstraction and the Cython driver
//! - result: Error handling and result types
//! - utils: Process execution, path and working-directory helpers
//! - vcs: Change sets from version control
pub mod build;
pub mod cli;
pub mod commands;
pub mod compiler;
pub mod result;
pub mod utils;
pub mod vcs;
