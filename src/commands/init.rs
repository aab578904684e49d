use crate::build::{init_project, BuildOrchestrator, InitRequest, Settings, Summary};
use crate::cli::parser::CliParser;
use crate::commands::run::compile_report;
use crate::compiler::CythonToolchain;
use crate::result::Result;
use crate::utils::absolutize;
use std::io::{BufRead, Write};
use std::path::Path;

pub fn request_for(base_dir: &Path, settings: &Settings, src: &Path) -> InitRequest {
    InitRequest {
        src: absolutize(base_dir, src),
        build_dir: absolutize(base_dir, &settings.build_dir),
        paths: settings.paths.clone(),
        copy_ignores: settings.copy_ignores.clone(),
        ignores: settings.ignores.clone(),
    }
}

/// Asks on stdin whether `path` may be deleted; only `y`/`yes` agree.
pub fn confirm_removal(path: &Path) -> Result<bool> {
    let stdin = std::io::stdin();
    ask(path, &mut stdin.lock(), &mut std::io::stdout())
}

fn ask(path: &Path, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(
        output,
        "The build directory {} already exists, remove it? [y/N] ",
        path.display()
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub async fn execute(
    base_dir: &Path,
    settings: &Settings,
    src: &Path,
    assume_yes: bool,
) -> Result<Summary> {
    CliParser::validate_source_dir(&absolutize(base_dir, src))?;

    let request = request_for(base_dir, settings, src);
    log::info!(
        "Initializing {} from {}",
        request.build_dir.display(),
        request.src.display()
    );

    let orchestrator = BuildOrchestrator::new(CythonToolchain::new(&settings.python));
    let summary = init_project(&orchestrator, &request, |path| {
        if assume_yes {
            Ok(true)
        } else {
            confirm_removal(path)
        }
    })
    .await?;

    compile_report(&summary);
    Ok(summary)
}
