// vidsqueeze-cli/src/terminal.rs
//
// Terminal output helpers. User-facing status lines, errors, and the run
// summary go to stderr through these, styled with console; internal tracing
// goes through the log facade instead.

use console::style;
use vidsqueeze_core::{
    calculate_size_reduction, format_bytes, format_duration, FileOutcome,
};

/// Prints a status line (key-value pair) to stderr.
pub fn print_status(label: &str, value: &str) {
    eprintln!("{}: {}", style(label).bold(), value);
}

/// Prints a clearly marked error message to stderr.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}

/// Prints a success line to stderr.
pub fn print_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Prints the end-of-run summary: one line per file, then totals.
pub fn print_summary(outcomes: &[FileOutcome], verbose: bool) {
    for outcome in outcomes {
        match outcome {
            FileOutcome::Success(stats) => {
                let reduction = calculate_size_reduction(stats.input_size, stats.output_size);
                print_success(&format!(
                    "{}: {} -> {} ({reduction}% smaller)",
                    stats.filename,
                    format_bytes(stats.input_size),
                    format_bytes(stats.output_size),
                ));
                if verbose {
                    print_status("  Wrote", &stats.output_path.display().to_string());
                    print_status(
                        "  Encode time",
                        &format_duration(stats.duration.as_secs_f64()),
                    );
                }
            }
            FileOutcome::Failure(failure) => {
                print_error(&format!(
                    "{} ({} failure): {}",
                    failure.filename, failure.kind, failure.message
                ));
            }
        }
    }

    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    let failed = outcomes.len() - succeeded;
    if failed > 0 {
        print_status(
            "Done",
            &format!("{succeeded} succeeded, {failed} failed"),
        );
    } else {
        print_status("Done", &format!("{succeeded} file(s) compressed"));
    }
}
