// vidsqueeze-cli/src/main.rs
//
// Entry point for the vidsqueeze command-line tool. Parses arguments, sets
// up logging, runs the sequential compression batch through vidsqueeze-core,
// prints the summary, and maps the results to the process exit code:
// 0 only when every input file succeeded.

mod cli;
mod logging;
mod progress;
mod terminal;

use clap::Parser;
use vidsqueeze_core::{process_files, CoreResult, FileOutcome};

fn main() {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            terminal::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Runs the batch. Returns `Ok(true)` when every file succeeded, `Ok(false)`
/// when at least one file failed, and `Err` for fatal errors (bad request
/// shape, missing external tools).
fn run(cli: cli::Cli) -> CoreResult<bool> {
    let verbose = cli.verbose >= 1;
    let settings = cli.settings();

    if verbose {
        terminal::print_status(
            "Run started",
            &chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        terminal::print_status("Files", &cli.input_files.len().to_string());
    }

    let mut reporter = progress::ProgressReporter::new(verbose);
    let mut on_update = |update| reporter.handle(update);
    let outcomes = process_files(&cli.input_files, &settings, cli.output.clone(), &mut on_update)?;

    terminal::print_summary(&outcomes, verbose);

    Ok(outcomes.iter().all(FileOutcome::is_success))
}
