// vidsqueeze-cli/src/progress.rs
//
// Wires core progress updates to an indicatif bar. One bar is active at a
// time (files are processed sequentially); it is drawn to stderr at a capped
// refresh rate and cleared when its file finishes.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use vidsqueeze_core::ProgressUpdate;

use crate::terminal;

pub struct ProgressReporter {
    bar: Option<ProgressBar>,
    verbose: bool,
}

impl ProgressReporter {
    pub fn new(verbose: bool) -> Self {
        Self { bar: None, verbose }
    }

    /// Handles one progress update from the core batch runner.
    pub fn handle(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::Started {
                filename,
                index,
                total,
                duration_secs,
            } => {
                if self.verbose {
                    terminal::print_status("Compressing", &filename);
                }
                log::debug!("Starting {filename} ({duration_secs:.2}s of video)");

                let bar = ProgressBar::new(100);
                bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(4));
                if let Ok(bar_style) = ProgressStyle::default_bar().template(
                    "{prefix:.bold} {wide_msg} {percent:>3}% |{bar:32}| [{elapsed_precise}<{eta_precise}]",
                ) {
                    bar.set_style(bar_style);
                }
                bar.set_prefix(format!("[{}/{}]", index + 1, total));
                bar.set_message(filename);
                self.bar = Some(bar);
            }
            ProgressUpdate::Encoding { percent, speed, .. } => {
                if let Some(bar) = &self.bar {
                    bar.set_position(u64::from(percent.clamp(0.0, 100.0) as u32));
                    if speed > 0.0 {
                        log::trace!("encoding at {speed:.2}x");
                    }
                }
            }
            ProgressUpdate::Finished { filename } => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_and_clear();
                }
                log::debug!("Finished {filename}");
            }
        }
    }
}
