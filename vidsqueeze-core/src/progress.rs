//! Progress event mapping for ffmpeg runs.
//!
//! Translates the raw event stream from the ffmpeg child process into
//! [`ProgressUpdate`] values for the caller's observer, and accumulates
//! stderr diagnostics for failure reporting.

use crate::utils::parse_ffmpeg_time;

use ffmpeg_sidecar::event::{FfmpegEvent, FfmpegProgress, LogLevel as FfmpegLogLevel};

/// Progress notifications emitted while processing a batch.
#[derive(Debug, Clone)]
pub enum ProgressUpdate {
    /// Processing of one input file is starting.
    Started {
        filename: String,
        index: usize,
        total: usize,
        duration_secs: f64,
    },
    /// The encoder advanced through the current file.
    Encoding {
        percent: f32,
        current_secs: f64,
        total_secs: f64,
        speed: f32,
        fps: f32,
        eta_secs: f64,
    },
    /// The current file finished (successfully or not).
    Finished { filename: String },
}

/// Maps ffmpeg events to progress updates for one encode.
pub struct FfmpegProgressHandler<'a> {
    duration_secs: f64,
    last_percent: f32,
    stderr_buffer: String,
    on_update: &'a mut dyn FnMut(ProgressUpdate),
}

impl<'a> FfmpegProgressHandler<'a> {
    pub fn new(duration_secs: f64, on_update: &'a mut dyn FnMut(ProgressUpdate)) -> Self {
        Self {
            duration_secs,
            last_percent: -1.0,
            stderr_buffer: String::new(),
            on_update,
        }
    }

    /// The accumulated stderr diagnostics.
    #[must_use]
    pub fn stderr_buffer(&self) -> &str {
        &self.stderr_buffer
    }

    /// Handles one event from the ffmpeg event stream.
    pub fn handle_event(&mut self, event: FfmpegEvent) {
        match event {
            FfmpegEvent::Progress(progress) => self.handle_progress(&progress),
            FfmpegEvent::Log(level, message) => self.handle_log(&level, &message),
            FfmpegEvent::Error(error) => self.handle_error(&error),
            _ => {}
        }
    }

    fn handle_progress(&mut self, progress: &FfmpegProgress) {
        let current_secs = parse_ffmpeg_time(&progress.time).unwrap_or(0.0);
        let percent = if self.duration_secs > 0.0 {
            ((current_secs / self.duration_secs) * 100.0).min(100.0) as f32
        } else {
            0.0
        };

        // Only forward meaningful movement; the terminal redraw is rate-capped
        // downstream anyway.
        if percent >= self.last_percent + 1.0 || (percent >= 100.0 && self.last_percent < 100.0) {
            let eta_secs = if progress.speed > 0.01 && self.duration_secs > current_secs {
                (self.duration_secs - current_secs) / f64::from(progress.speed)
            } else {
                0.0
            };

            (self.on_update)(ProgressUpdate::Encoding {
                percent,
                current_secs,
                total_secs: self.duration_secs,
                speed: progress.speed,
                fps: progress.fps,
                eta_secs,
            });
            self.last_percent = percent;
        }
    }

    fn handle_log(&mut self, level: &FfmpegLogLevel, message: &str) {
        match level {
            FfmpegLogLevel::Fatal | FfmpegLogLevel::Error => {
                log::debug!(target: "ffmpeg_log", "{message}");
                self.stderr_buffer.push_str(message);
                self.stderr_buffer.push('\n');
            }
            FfmpegLogLevel::Warning => log::debug!(target: "ffmpeg_log", "{message}"),
            _ => log::trace!(target: "ffmpeg_log", "{message}"),
        }
    }

    fn handle_error(&mut self, error: &str) {
        if is_non_critical_ffmpeg_error(error) {
            log::debug!("ffmpeg non-critical message: {error}");
        } else {
            log::warn!("ffmpeg stderr: {error}");
        }

        self.stderr_buffer.push_str(error);
        self.stderr_buffer.push('\n');
    }
}

/// FFmpeg messages that show up on stderr without indicating actual problems.
fn is_non_critical_ffmpeg_error(error: &str) -> bool {
    error.contains("deprecated pixel format")
        || error.contains("No accelerated colorspace conversion")
        || error.contains("automatically inserted filter")
        || error.contains("Timestamps are unset")
        || error.contains("first frame is no keyframe")
}
