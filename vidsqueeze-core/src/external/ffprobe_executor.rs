//! FFprobe integration for media analysis.
//!
//! Extracts the properties the runner needs from an input file: duration
//! (drives the progress percentage), dimensions, and on-disk size.

use crate::error::{CoreError, CoreResult};

use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Properties of a probed video file.
#[derive(Debug, Clone)]
pub struct VideoInfo {
    /// Duration of the media in seconds.
    pub duration_secs: f64,
    /// Width of the first video stream.
    pub width: i64,
    /// Height of the first video stream.
    pub height: i64,
    /// Size of the source file in bytes.
    pub size: u64,
}

/// Probes a video file and returns its properties.
///
/// Fails when ffprobe cannot parse the file, when no video stream is present,
/// or when the container reports no usable duration.
pub fn probe_video(input_path: &Path) -> CoreResult<VideoInfo> {
    log::debug!("Running ffprobe on: {}", input_path.display());

    let metadata = ffprobe(input_path)
        .map_err(|err| map_ffprobe_error(err, input_path))?;

    let video_stream = metadata
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| {
            CoreError::Probe(format!(
                "no video stream found in {}",
                input_path.display()
            ))
        })?;

    let width = video_stream.width.unwrap_or(0);
    let height = video_stream.height.unwrap_or(0);

    let duration_secs = metadata
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .ok_or_else(|| {
            CoreError::Probe(format!(
                "failed to determine duration of {}",
                input_path.display()
            ))
        })?;

    let size = std::fs::metadata(input_path)?.len();

    Ok(VideoInfo {
        duration_secs,
        width,
        height,
        size,
    })
}

/// Returns true when ffprobe reports at least one video stream.
///
/// Used by pre-launch validation; unlike [`probe_video`] this tolerates a
/// missing duration.
pub fn has_video_stream(input_path: &Path) -> CoreResult<bool> {
    let metadata = ffprobe(input_path)
        .map_err(|err| map_ffprobe_error(err, input_path))?;
    Ok(metadata
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("video")))
}

fn map_ffprobe_error(err: FfProbeError, input_path: &Path) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => {
            CoreError::CommandStart("ffprobe".to_string(), io_err.to_string())
        }
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            CoreError::Probe(format!(
                "ffprobe failed on {}: {}",
                input_path.display(),
                stderr
            ))
        }
        other => CoreError::Probe(format!(
            "ffprobe error on {}: {other:?}",
            input_path.display()
        )),
    }
}
