//! Batch orchestration: validate, probe, compress, report.
//!
//! Files are processed strictly sequentially, one encoder child process at a
//! time. A per-file failure (validation or encoder) is recorded in that
//! file's outcome and never aborts the batch; only a missing external
//! dependency is fatal, reported once before any file is touched.

use crate::error::{CoreError, CoreResult};
use crate::external::{self, ffprobe_executor, VideoInfo};
use crate::progress::ProgressUpdate;
use crate::request::{
    CompressionRequest, CompressionSettings, EncodeStats, FailureKind, FileFailure, FileOutcome,
};

use std::path::{Path, PathBuf};
use std::time::Instant;

/// Abstraction over the external tools, so the batch logic can be exercised
/// without spawning real ffmpeg/ffprobe processes.
pub trait Compressor {
    /// Verifies the external binaries are available. Called once per batch.
    fn check_dependencies(&self) -> CoreResult<()>;

    /// Runs pre-launch validation on one input file.
    fn validate(&self, input: &Path) -> CoreResult<()>;

    /// Probes one input file for duration, dimensions, and size.
    fn probe(&self, input: &Path) -> CoreResult<VideoInfo>;

    /// Compresses one request, forwarding progress updates.
    fn compress(
        &self,
        request: &CompressionRequest,
        info: &VideoInfo,
        on_update: &mut dyn FnMut(ProgressUpdate),
    ) -> CoreResult<()>;
}

/// Production implementation backed by the ffmpeg and ffprobe binaries.
#[derive(Debug, Clone, Default)]
pub struct SystemCompressor;

impl Compressor for SystemCompressor {
    fn check_dependencies(&self) -> CoreResult<()> {
        external::check_dependency("ffmpeg")?;
        external::check_dependency("ffprobe")?;
        Ok(())
    }

    fn validate(&self, input: &Path) -> CoreResult<()> {
        crate::validation::validate_file(input)
    }

    fn probe(&self, input: &Path) -> CoreResult<VideoInfo> {
        ffprobe_executor::probe_video(input)
    }

    fn compress(
        &self,
        request: &CompressionRequest,
        info: &VideoInfo,
        on_update: &mut dyn FnMut(ProgressUpdate),
    ) -> CoreResult<()> {
        external::ffmpeg::run_compress(request, info, on_update)
    }
}

/// Processes a list of input files with the given settings.
///
/// `explicit_output` may only be used with a single input file. Progress is
/// reported through `on_update`; the returned vector holds one outcome per
/// input, in order.
pub fn process_files(
    inputs: &[PathBuf],
    settings: &CompressionSettings,
    explicit_output: Option<PathBuf>,
    on_update: &mut dyn FnMut(ProgressUpdate),
) -> CoreResult<Vec<FileOutcome>> {
    process_files_with(&SystemCompressor, inputs, settings, explicit_output, on_update)
}

/// Batch loop over an arbitrary [`Compressor`] implementation.
pub fn process_files_with(
    compressor: &dyn Compressor,
    inputs: &[PathBuf],
    settings: &CompressionSettings,
    explicit_output: Option<PathBuf>,
    on_update: &mut dyn FnMut(ProgressUpdate),
) -> CoreResult<Vec<FileOutcome>> {
    if explicit_output.is_some() && inputs.len() > 1 {
        return Err(CoreError::InvalidRequest(
            "an explicit output path requires exactly one input file".to_string(),
        ));
    }

    // Both tools are preconditions for the whole batch; missing binaries are
    // a fatal configuration error, not a per-file one.
    compressor.check_dependencies()?;

    let total = inputs.len();
    let mut outcomes = Vec::with_capacity(total);
    for (index, input) in inputs.iter().enumerate() {
        outcomes.push(process_one(
            compressor,
            input,
            settings,
            explicit_output.clone(),
            index,
            total,
            on_update,
        ));
    }

    Ok(outcomes)
}

fn process_one(
    compressor: &dyn Compressor,
    input: &Path,
    settings: &CompressionSettings,
    explicit_output: Option<PathBuf>,
    index: usize,
    total: usize,
    on_update: &mut dyn FnMut(ProgressUpdate),
) -> FileOutcome {
    let filename = input
        .file_name()
        .map_or_else(|| input.display().to_string(), |n| {
            n.to_string_lossy().to_string()
        });

    if let Err(e) = compressor.validate(input) {
        log::warn!("Validation failed for {}: {e}", input.display());
        return FileOutcome::Failure(FileFailure {
            filename,
            kind: FailureKind::Validation,
            message: e.to_string(),
        });
    }

    let info = match compressor.probe(input) {
        Ok(info) => info,
        Err(e) => {
            log::warn!("Probe failed for {}: {e}", input.display());
            return FileOutcome::Failure(FileFailure {
                filename,
                kind: FailureKind::Validation,
                message: e.to_string(),
            });
        }
    };
    log::debug!(
        "Probed {}: {}x{}, {:.2}s, {} bytes",
        input.display(),
        info.width,
        info.height,
        info.duration_secs,
        info.size
    );

    let request = match CompressionRequest::new(input, settings.clone(), explicit_output) {
        Ok(request) => request,
        Err(e) => {
            return FileOutcome::Failure(FileFailure {
                filename,
                kind: FailureKind::Validation,
                message: e.to_string(),
            });
        }
    };

    on_update(ProgressUpdate::Started {
        filename: filename.clone(),
        index,
        total,
        duration_secs: info.duration_secs,
    });

    let start_time = Instant::now();
    let result = compressor.compress(&request, &info, &mut *on_update);
    on_update(ProgressUpdate::Finished {
        filename: filename.clone(),
    });

    match result {
        Ok(()) => {
            let output_size = std::fs::metadata(&request.output)
                .map(|m| m.len())
                .unwrap_or(0);
            FileOutcome::Success(EncodeStats {
                filename,
                output_path: request.output,
                duration: start_time.elapsed(),
                input_size: info.size,
                output_size,
            })
        }
        Err(e) => {
            log::error!("Encoding failed for {}: {e}", input.display());
            FileOutcome::Failure(FileFailure {
                filename,
                kind: FailureKind::Encoder,
                message: e.to_string(),
            })
        }
    }
}
