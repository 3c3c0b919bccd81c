//! Pre-launch validation of input files.
//!
//! Every input goes through the same sequence before any encoder process is
//! started: it must exist as a regular file, be non-empty, and contain at
//! least one video stream according to ffprobe. A failed check yields a
//! per-file validation failure; the batch continues with the next file.

use crate::error::{CoreError, CoreResult};
use crate::external::ffprobe_executor;

use std::path::Path;

/// Checks that `path` points at a plausible input file without invoking
/// ffprobe: it must exist, be a regular file, and have non-zero size.
pub fn validate_file_metadata(path: &Path) -> CoreResult<()> {
    if !path.exists() {
        return Err(CoreError::Validation(format!(
            "{}: file does not exist",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(path).map_err(|e| {
        CoreError::Validation(format!("{}: cannot read metadata: {e}", path.display()))
    })?;

    if !metadata.is_file() {
        return Err(CoreError::Validation(format!(
            "{}: not a regular file",
            path.display()
        )));
    }

    if metadata.len() == 0 {
        return Err(CoreError::Validation(format!(
            "{}: file is empty",
            path.display()
        )));
    }

    Ok(())
}

/// Runs all validation checks on one input file.
pub fn validate_file(path: &Path) -> CoreResult<()> {
    log::debug!("Validating input: {}", path.display());
    validate_file_metadata(path)?;

    match ffprobe_executor::has_video_stream(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CoreError::Validation(format!(
            "{}: no video stream found",
            path.display()
        ))),
        Err(e) => Err(CoreError::Validation(format!(
            "{}: not a readable video file: {e}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_nonexistent_file_fails() {
        let err = validate_file_metadata(Path::new("surely/missing/input.mp4")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_file_metadata(dir.path()).unwrap_err();
        assert!(err.to_string().contains("not a regular file"));
    }

    #[test]
    fn test_empty_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.mp4");
        std::fs::File::create(&path).unwrap();
        let err = validate_file_metadata(&path).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_non_empty_regular_file_passes_metadata_checks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"not really a video").unwrap();
        assert!(validate_file_metadata(&path).is_ok());
    }
}
