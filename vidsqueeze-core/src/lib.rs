//! Core library for batch video compression via ffmpeg.
//!
//! This crate provides input validation, media probing, ffmpeg command
//! construction and execution, and sequential batch orchestration with
//! progress reporting. The heavy lifting (decoding, encoding, filtering) is
//! delegated entirely to the external ffmpeg binary, invoked as a child
//! process.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidsqueeze_core::{process_files, CompressionSettings, QualityMode};
//! use std::path::PathBuf;
//!
//! let settings = CompressionSettings {
//!     resolution: Some("1080p".parse().unwrap()),
//!     fps: None,
//!     quality: QualityMode::Crf(28),
//!     no_audio: false,
//! };
//!
//! let inputs = vec![PathBuf::from("/path/to/video.mp4")];
//! let outcomes = process_files(&inputs, &settings, None, &mut |_update| {}).unwrap();
//! for outcome in outcomes {
//!     println!("{outcome:?}");
//! }
//! ```

pub mod error;
pub mod external;
pub mod processing;
pub mod progress;
pub mod request;
pub mod utils;
pub mod validation;

// Re-exports for public API
pub use error::{CoreError, CoreResult};
pub use external::{check_dependency, probe_video, VideoInfo};
pub use processing::{process_files, process_files_with, Compressor, SystemCompressor};
pub use progress::ProgressUpdate;
pub use request::{
    CompressionRequest, CompressionSettings, EncodeStats, FailureKind, FileFailure, FileOutcome,
    FrameRate, QualityMode, Resolution,
};
pub use utils::{calculate_size_reduction, format_bytes, format_duration, parse_ffmpeg_time};
