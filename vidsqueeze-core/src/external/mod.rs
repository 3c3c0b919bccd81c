//! Interactions with the external ffmpeg and ffprobe binaries.
//!
//! Everything that crosses the subprocess boundary lives here: dependency
//! checks, media probing, and ffmpeg command construction and execution.

use crate::error::{CoreError, CoreResult};

use std::io;
use std::process::{Command, Stdio};

pub mod ffmpeg;
pub mod ffprobe_executor;

pub use ffmpeg::{build_ffmpeg_command, run_compress};
pub use ffprobe_executor::{probe_video, VideoInfo};

/// Checks that a required external command is available and executable.
///
/// Runs `<cmd> -version` and discards its output; only the ability to start
/// the process matters. Used once per run for ffmpeg and ffprobe before any
/// file is touched.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(CoreError::CommandStart(cmd_name.to_string(), e.to_string()))
        }
    }
}
