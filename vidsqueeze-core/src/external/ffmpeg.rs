//! FFmpeg command building and execution for video compression.
//!
//! Translates a [`CompressionRequest`] into the equivalent ffmpeg argument
//! list (libx264 video, AAC audio), runs ffmpeg as a child process, and maps
//! its event stream and exit status back into typed results.

use crate::error::{CoreError, CoreResult};
use crate::external::ffprobe_executor::VideoInfo;
use crate::progress::{FfmpegProgressHandler, ProgressUpdate};
use crate::request::{CompressionRequest, CompressionSettings};

use ffmpeg_sidecar::child::FfmpegChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use std::process::ExitStatus;

/// Builds the output-side encoder argument list for the given settings.
///
/// Order matches the original invocation: audio handling, optional scale
/// filter, optional frame rate, then the video codec configuration.
/// "Unchanged" settings contribute no flags at all, so ffmpeg preserves the
/// source behavior.
#[must_use]
pub fn encoder_args(settings: &CompressionSettings) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();

    if settings.no_audio {
        args.push("-an".to_string());
    } else {
        args.extend(["-c:a", "aac", "-b:a", "128k"].map(String::from));
    }

    if let Some(resolution) = settings.resolution {
        args.push("-vf".to_string());
        args.push(resolution.scale_filter());
    }

    if let Some(fps) = settings.fps {
        args.push("-r".to_string());
        args.push(fps.arg_value());
    }

    args.extend(["-c:v", "libx264", "-preset", "medium"].map(String::from));
    args.push("-crf".to_string());
    args.push(settings.quality.crf().to_string());

    args
}

/// Builds the complete ffmpeg command for one request.
#[must_use]
pub fn build_ffmpeg_command(request: &CompressionRequest) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.arg("-y");
    cmd.input(request.input.to_string_lossy().as_ref());
    for arg in encoder_args(&request.settings) {
        cmd.arg(arg);
    }
    cmd.output(request.output.to_string_lossy().as_ref());
    cmd
}

/// Owns the ffmpeg child for the duration of one encode.
///
/// Whatever path leaves `run_compress` (error, panic, interrupt unwinding),
/// the child is killed and reaped rather than left running against a
/// half-written output file.
struct ChildGuard {
    child: Option<FfmpegChild>,
}

impl ChildGuard {
    fn new(child: FfmpegChild) -> Self {
        Self { child: Some(child) }
    }

    fn child_mut(&mut self) -> CoreResult<&mut FfmpegChild> {
        self.child.as_mut().ok_or_else(|| {
            CoreError::CommandStart("ffmpeg".to_string(), "child already reaped".to_string())
        })
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        let mut child = self
            .child
            .take()
            .ok_or_else(|| CoreError::CommandStart(
                "ffmpeg".to_string(),
                "child already reaped".to_string(),
            ))?;
        child
            .wait()
            .map_err(|e| CoreError::CommandStart("ffmpeg".to_string(), e.to_string()))
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Runs the ffmpeg compression for one request, forwarding progress updates.
///
/// Returns `Ok(())` on a clean exit; a nonzero exit status maps to
/// [`CoreError::CommandFailed`] carrying the captured stderr diagnostics.
pub fn run_compress(
    request: &CompressionRequest,
    info: &VideoInfo,
    on_update: &mut dyn FnMut(ProgressUpdate),
) -> CoreResult<()> {
    let mut cmd = build_ffmpeg_command(request);
    log::debug!("Running ffmpeg command: {cmd:?}");

    let child = cmd
        .spawn()
        .map_err(|e| CoreError::CommandStart("ffmpeg".to_string(), e.to_string()))?;
    let mut guard = ChildGuard::new(child);

    let mut handler = FfmpegProgressHandler::new(info.duration_secs, on_update);
    let events = guard.child_mut()?.iter().map_err(|e| {
        CoreError::CommandStart(
            "ffmpeg".to_string(),
            format!("failed to read event stream: {e}"),
        )
    })?;
    for event in events {
        handler.handle_event(event);
    }

    let status = guard.wait()?;
    if status.success() {
        log::debug!("ffmpeg finished successfully for {}", request.input.display());
        Ok(())
    } else {
        Err(CoreError::CommandFailed {
            tool: "ffmpeg".to_string(),
            status: status
                .code()
                .map_or_else(|| "terminated by signal".to_string(), |c| c.to_string()),
            stderr: handler.stderr_buffer().trim().to_string(),
        })
    }
}
