use clap::Parser;
use dirs::config_dir;
use env_logger::Builder;
use log::LevelFilter;
use pyseal::cli::Cli;
use std::fs::OpenOptions;

/** Main entry point for the pyseal application
 *
 * # Process Flow
 * 1. Initialize logging system with file output
 * 2. Parse command line arguments using Clap
 * 3. Execute the requested command
 * 4. Report errors and exit with status 1
 *
 * # Exit Codes
 * - 0 on success, including batches where single files failed to compile
 * - 1 on declined confirmation, invalid revisions and other fatal errors
 * - Clap's own codes for usage errors
 */
#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = cli.execute().await {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/** Initializes the logging system with file-based output
 *
 * # Configuration
 * - Log file location: platform-specific config directory
 * - Log level: Info and above, `RUST_LOG` overrides
 * - Output: Append mode to preserve historical logs
 * - Fallback: stderr when the log file cannot be opened
 *
 * # Directory Structure
 * - Linux: `~/.config/pyseal/pyseal.log`
 * - macOS: `~/Library/Application Support/pyseal/pyseal.log`
 * - Windows: `%APPDATA%\pyseal\pyseal.log`
 */
fn init_logging() {
    let log_file = get_log_file_path();

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).ok(); // Non-fatal if directory creation fails
    }

    let mut builder = Builder::new();
    builder.filter_level(LevelFilter::Info);
    builder.parse_default_env();

    match OpenOptions::new().create(true).append(true).open(&log_file) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.target(env_logger::Target::Stderr);
        }
    }

    builder.init();
    log::info!("pyseal started");
}

fn get_log_file_path() -> std::path::PathBuf {
    if let Some(config_dir) = config_dir() {
        config_dir.join("pyseal").join("pyseal.log")
    } else {
        std::env::current_dir()
            .map(|p| p.join("pyseal.log"))
            .unwrap_or_else(|_| "pyseal.log".into())
    }
}
