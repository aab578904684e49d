pub mod parser;

use crate::build::config::DEFAULT_CONFIG_FILE;
use crate::build::Overrides;
use crate::commands::CommandExecutor;
use crate::result::Result;
use clap::{Args, Parser, Subcommand};
use parser::CliParser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pyseal")]
#[command(about = "Compile Python sources into native extension modules")]
#[command(version)]
#[command(arg_required_else_help = true)]
#[command(help_template = "{before-help}{name} v{version}\n\n{about-with-newline}\n\
    {usage-heading} {usage}\n\n{all-args}{after-help}")]
pub struct Cli {
    #[arg(
        short,
        long,
        global = true,
        default_value = DEFAULT_CONFIG_FILE,
        help = "Config file, ignored when missing or invalid"
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
pub struct CompileArgs {
    #[arg(short, long, help = "The build directory [default: build]")]
    build_dir: Option<PathBuf>,

    #[arg(
        short,
        long = "ignore",
        value_name = "REGEX",
        help = "Files whose path matches are not compiled; repeatable"
    )]
    ignores: Vec<String>,

    #[arg(
        long,
        value_name = "INTERPRETER",
        help = "Python used to run Cython [default: python3]"
    )]
    python: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct SourceCleanupArgs {
    #[arg(long, help = "Delete each source file after it compiled")]
    clean_source: bool,

    #[arg(
        long,
        conflicts_with = "clean_source",
        help = "Keep source files, overriding the config"
    )]
    keep_source: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Compile the given files and directories")]
    #[command(long_about = "Compile the given files and directories.\n\n\
        Without PATHS the config file paths are used, falling back to the current directory.")]
    Run {
        #[arg(help = "Files or directories to compile")]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        compile: CompileArgs,

        #[command(flatten)]
        cleanup: SourceCleanupArgs,
    },

    #[command(about = "Copy a source tree to the build directory and compile it there")]
    Init {
        #[arg(help = "Source directory to copy")]
        src_dir: PathBuf,

        #[command(flatten)]
        compile: CompileArgs,

        #[arg(
            short = 'I',
            long = "copy-ignore",
            value_name = "GLOB",
            help = "Entries matching are not copied; repeatable"
        )]
        copy_ignores: Vec<String>,

        #[arg(short, long, help = "Replace an existing build directory without asking")]
        yes: bool,
    },

    #[command(about = "Compile the files changed between two git revisions")]
    Diff {
        #[arg(help = "Base revision")]
        rev_a: String,

        #[arg(help = "Target revision")]
        rev_b: String,

        #[command(flatten)]
        compile: CompileArgs,

        #[command(flatten)]
        cleanup: SourceCleanupArgs,
    },

    #[command(about = "Delete build directories and bytecode caches")]
    Clean {
        #[arg(help = "Directories to clean [default: .]")]
        dirs: Vec<PathBuf>,

        #[arg(
            short,
            long,
            help = "Name of the build directories to delete [default: build]"
        )]
        build_dir: Option<PathBuf>,
    },
}

impl CompileArgs {
    fn overrides(self) -> Overrides {
        Overrides {
            build_dir: self.build_dir,
            ignores: CliParser::repeated(self.ignores),
            python: self.python,
            ..Overrides::default()
        }
    }
}

impl SourceCleanupArgs {
    fn clean_source(&self) -> Option<bool> {
        CliParser::clean_source_flag(self.clean_source, self.keep_source)
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let executor = CommandExecutor::new(&self.config).await?;

        match self.command {
            Commands::Run {
                paths,
                compile,
                cleanup,
            } => {
                let overrides = Overrides {
                    paths: CliParser::repeated(paths),
                    clean_source: cleanup.clean_source(),
                    ..compile.overrides()
                };
                executor.run_paths(overrides).await
            }
            Commands::Init {
                src_dir,
                compile,
                copy_ignores,
                yes,
            } => {
                let overrides = Overrides {
                    copy_ignores: CliParser::repeated(copy_ignores),
                    ..compile.overrides()
                };
                executor.init_project(&src_dir, overrides, yes).await
            }
            Commands::Diff {
                rev_a,
                rev_b,
                compile,
                cleanup,
            } => {
                let overrides = Overrides {
                    clean_source: cleanup.clean_source(),
                    ..compile.overrides()
                };
                executor.compile_diff(&rev_a, &rev_b, overrides).await
            }
            Commands::Clean { dirs, build_dir } => {
                let overrides = Overrides {
                    build_dir,
                    ..Overrides::default()
                };
                executor.clean(&dirs, overrides)
            }
        }
    }
}
