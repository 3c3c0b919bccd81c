// vidsqueeze-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use std::path::PathBuf;
use vidsqueeze_core::{CompressionSettings, FrameRate, QualityMode, Resolution};

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Compress video files",
    long_about = "Compresses video files by invoking ffmpeg with translated \
                  resolution, frame-rate, and quality options."
)]
pub struct Cli {
    /// Input video files to compress
    #[arg(required = true, value_name = "INPUT_FILES")]
    pub input_files: Vec<PathBuf>,

    /// Strip the audio track (otherwise audio is re-encoded to AAC 128k)
    #[arg(short = 'n', long)]
    pub no_audio: bool,

    /// Target resolution [possible values: 4k, 1080p, 720p, 576p, 480p]
    #[arg(short, long, value_name = "RESOLUTION")]
    pub resolution: Option<Resolution>,

    /// Frame rate (film=24, pal=25, ntsc=30, 60fps=60, or a custom number)
    #[arg(short, long, value_name = "FPS")]
    pub fps: Option<FrameRate>,

    /// Lossless mode
    #[arg(short, long, conflicts_with = "quality")]
    pub lossless: bool,

    /// CRF quality (0-51, lower is better, 23 is default)
    #[arg(short, long, value_name = "CRF", value_parser = clap::value_parser!(u8).range(0..=51))]
    pub quality: Option<u8>,

    /// Write the result to this path (single input file only)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Increase verbosity (-v status lines, -vv adds ffmpeg commands; RUST_LOG overrides)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Translates the parsed flags into core compression settings.
    pub fn settings(&self) -> CompressionSettings {
        let quality = if self.lossless {
            QualityMode::Lossless
        } else {
            match self.quality {
                Some(level) => QualityMode::Crf(level),
                None => QualityMode::Default,
            }
        };

        CompressionSettings {
            resolution: self.resolution,
            fps: self.fps,
            quality,
            no_audio: self.no_audio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_args() {
        let cli = Cli::parse_from(["vidsqueeze", "a.mp4", "b.mkv"]);
        assert_eq!(cli.input_files.len(), 2);
        assert!(!cli.no_audio);
        assert!(cli.resolution.is_none());
        assert!(cli.fps.is_none());
        assert!(!cli.lossless);
        assert!(cli.quality.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_full_options() {
        let cli = Cli::parse_from([
            "vidsqueeze",
            "-n",
            "--resolution",
            "720p",
            "--fps",
            "ntsc",
            "--quality",
            "28",
            "-vv",
            "clip.mp4",
        ]);
        assert!(cli.no_audio);
        assert_eq!(cli.resolution, Some(Resolution::P720));
        assert_eq!(cli.fps, Some(FrameRate::Ntsc));
        assert_eq!(cli.quality, Some(28));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_lossless_conflicts_with_quality() {
        let result = Cli::try_parse_from(["vidsqueeze", "-l", "-q", "18", "clip.mp4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quality_range_enforced() {
        assert!(Cli::try_parse_from(["vidsqueeze", "-q", "52", "clip.mp4"]).is_err());
        assert!(Cli::try_parse_from(["vidsqueeze", "-q", "51", "clip.mp4"]).is_ok());
        assert!(Cli::try_parse_from(["vidsqueeze", "-q", "0", "clip.mp4"]).is_ok());
    }

    #[test]
    fn test_input_files_required() {
        assert!(Cli::try_parse_from(["vidsqueeze"]).is_err());
    }

    #[test]
    fn test_settings_translation() {
        let cli = Cli::parse_from(["vidsqueeze", "--lossless", "clip.mp4"]);
        assert_eq!(cli.settings().quality, QualityMode::Lossless);

        let cli = Cli::parse_from(["vidsqueeze", "-q", "30", "clip.mp4"]);
        assert_eq!(cli.settings().quality, QualityMode::Crf(30));

        let cli = Cli::parse_from(["vidsqueeze", "clip.mp4"]);
        assert_eq!(cli.settings().quality, QualityMode::Default);
    }

    #[test]
    fn test_invalid_resolution_rejected() {
        assert!(Cli::try_parse_from(["vidsqueeze", "-r", "1440p", "clip.mp4"]).is_err());
    }

    #[test]
    fn test_custom_fps_parsed() {
        let cli = Cli::parse_from(["vidsqueeze", "-f", "29.97", "clip.mp4"]);
        assert_eq!(cli.fps, Some(FrameRate::Custom(29.97)));
        assert!(Cli::try_parse_from(["vidsqueeze", "-f", "-5", "clip.mp4"]).is_err());
    }
}
