//! Request model for compression work.
//!
//! A [`CompressionRequest`] is one validated unit of work corresponding to one
//! input file. Requests are built from parsed CLI options, consumed once by
//! the ffmpeg runner, and reported as a [`FileOutcome`].

use crate::error::{CoreError, CoreResult};

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Target output resolution. `None` at the request level means "unchanged".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Uhd4k,
    P1080,
    P720,
    P576,
    P480,
}

impl Resolution {
    /// Maximum output dimensions (width, height) for this resolution.
    #[must_use]
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            Resolution::Uhd4k => (3840, 2160),
            Resolution::P1080 => (1920, 1080),
            Resolution::P720 => (1280, 720),
            Resolution::P576 => (1024, 576),
            Resolution::P480 => (854, 480),
        }
    }

    /// The ffmpeg scale filter for this resolution.
    ///
    /// Downscales only (`min` against the source dimensions) and preserves the
    /// source aspect ratio.
    #[must_use]
    pub fn scale_filter(self) -> String {
        let (width, height) = self.dimensions();
        format!("scale=min({width}\\,iw):min({height}\\,ih):force_original_aspect_ratio=decrease")
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resolution::Uhd4k => "4k",
            Resolution::P1080 => "1080p",
            Resolution::P720 => "720p",
            Resolution::P576 => "576p",
            Resolution::P480 => "480p",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Resolution {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "4k" => Ok(Resolution::Uhd4k),
            "1080p" => Ok(Resolution::P1080),
            "720p" => Ok(Resolution::P720),
            "576p" => Ok(Resolution::P576),
            "480p" => Ok(Resolution::P480),
            other => Err(CoreError::InvalidRequest(format!(
                "unknown resolution '{other}' (expected 4k, 1080p, 720p, 576p, or 480p)"
            ))),
        }
    }
}

/// Target frame rate: a named standard rate or a custom positive number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameRate {
    Film,
    Pal,
    Ntsc,
    Sixty,
    Custom(f64),
}

impl FrameRate {
    /// The numeric rate in frames per second.
    #[must_use]
    pub fn rate(self) -> f64 {
        match self {
            FrameRate::Film => 24.0,
            FrameRate::Pal => 25.0,
            FrameRate::Ntsc => 30.0,
            FrameRate::Sixty => 60.0,
            FrameRate::Custom(rate) => rate,
        }
    }

    /// The value passed to ffmpeg's `-r` flag.
    #[must_use]
    pub fn arg_value(self) -> String {
        let rate = self.rate();
        if rate.fract() == 0.0 {
            format!("{rate:.0}")
        } else {
            format!("{rate}")
        }
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameRate::Film => write!(f, "film"),
            FrameRate::Pal => write!(f, "pal"),
            FrameRate::Ntsc => write!(f, "ntsc"),
            FrameRate::Sixty => write!(f, "60fps"),
            FrameRate::Custom(_) => write!(f, "{}", self.arg_value()),
        }
    }
}

impl FromStr for FrameRate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "film" => Ok(FrameRate::Film),
            "pal" => Ok(FrameRate::Pal),
            "ntsc" => Ok(FrameRate::Ntsc),
            "60fps" => Ok(FrameRate::Sixty),
            other => {
                let rate: f64 = other.parse().map_err(|_| {
                    CoreError::InvalidRequest(format!(
                        "invalid frame rate '{other}' (expected film, pal, ntsc, 60fps, or a number)"
                    ))
                })?;
                if rate.is_finite() && rate > 0.0 {
                    Ok(FrameRate::Custom(rate))
                } else {
                    Err(CoreError::InvalidRequest(format!(
                        "frame rate must be positive, got '{other}'"
                    )))
                }
            }
        }
    }
}

/// Quality mode for the video encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityMode {
    /// Encoder default (CRF 23).
    #[default]
    Default,
    /// Explicit CRF level, 0-51, lower is better.
    Crf(u8),
    /// Lossless encoding (CRF pinned to 0).
    Lossless,
}

impl QualityMode {
    /// The CRF value passed to the encoder.
    #[must_use]
    pub fn crf(self) -> u8 {
        match self {
            QualityMode::Default => 23,
            QualityMode::Crf(level) => level,
            QualityMode::Lossless => 0,
        }
    }
}

/// Option set shared by every file in a run.
#[derive(Debug, Clone, Default)]
pub struct CompressionSettings {
    pub resolution: Option<Resolution>,
    pub fps: Option<FrameRate>,
    pub quality: QualityMode,
    pub no_audio: bool,
}

impl CompressionSettings {
    /// Suffix appended to derived output filenames, encoding the options so
    /// that different runs over the same source never collide.
    #[must_use]
    pub fn output_suffix(&self) -> String {
        let mut suffix = String::from("-vsq");
        if self.no_audio {
            suffix.push_str("-n");
        }
        if let Some(resolution) = self.resolution {
            suffix.push_str(&format!("-r{resolution}"));
        }
        if let Some(fps) = self.fps {
            suffix.push_str(&format!("-f{fps}"));
        }
        match self.quality {
            QualityMode::Default => {}
            QualityMode::Crf(level) => suffix.push_str(&format!("-q{level}")),
            QualityMode::Lossless => suffix.push_str("-lossless"),
        }
        suffix
    }
}

/// One validated unit of compression work for a single input file.
#[derive(Debug, Clone)]
pub struct CompressionRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub settings: CompressionSettings,
}

impl CompressionRequest {
    /// Builds a request for `input`, deriving the output path from the input
    /// name and the option suffix unless an explicit output is given.
    pub fn new(
        input: &Path,
        settings: CompressionSettings,
        explicit_output: Option<PathBuf>,
    ) -> CoreResult<Self> {
        let output = match explicit_output {
            Some(path) => path,
            None => derive_output_path(input, &settings),
        };

        if output == input {
            return Err(CoreError::InvalidRequest(format!(
                "output path '{}' equals the input path",
                output.display()
            )));
        }

        Ok(Self {
            input: input.to_path_buf(),
            output,
            settings,
        })
    }

    /// The input filename for display and reporting.
    #[must_use]
    pub fn filename(&self) -> String {
        self.input
            .file_name()
            .map_or_else(|| self.input.display().to_string(), |name| {
                name.to_string_lossy().to_string()
            })
    }
}

/// Derives `<stem><suffix>.<ext>` next to the input file.
fn derive_output_path(input: &Path, settings: &CompressionSettings) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(String::new, |s| s.to_string_lossy().to_string());
    let extension = input
        .extension()
        .map_or_else(|| "mp4".to_string(), |e| e.to_string_lossy().to_string());
    input.with_file_name(format!("{stem}{}.{extension}", settings.output_suffix()))
}

/// Statistics for a successfully compressed file.
#[derive(Debug, Clone)]
pub struct EncodeStats {
    pub filename: String,
    pub output_path: PathBuf,
    pub duration: Duration,
    pub input_size: u64,
    pub output_size: u64,
}

/// Category of a per-file failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The input failed pre-launch checks; no encoder process was started.
    Validation,
    /// The encoder process exited with a nonzero status.
    Encoder,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Validation => write!(f, "validation"),
            FailureKind::Encoder => write!(f, "encoder"),
        }
    }
}

/// A per-file failure that does not abort the batch.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub filename: String,
    pub kind: FailureKind,
    pub message: String,
}

/// Outcome of processing one input file.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    Success(EncodeStats),
    Failure(FileFailure),
}

impl FileOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Success(_))
    }
}
