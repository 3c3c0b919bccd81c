use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn vidsqueeze_cmd() -> Command {
    Command::cargo_bin("vidsqueeze").expect("Failed to find vidsqueeze binary")
}

#[test]
fn test_help_describes_the_tool() -> Result<(), Box<dyn Error>> {
    vidsqueeze_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Compress"))
        .stdout(contains("--resolution"))
        .stdout(contains("--lossless"));
    Ok(())
}

#[test]
fn test_version_flag() -> Result<(), Box<dyn Error>> {
    vidsqueeze_cmd().arg("--version").assert().success();
    Ok(())
}

#[test]
fn test_no_input_files_is_an_error() -> Result<(), Box<dyn Error>> {
    vidsqueeze_cmd()
        .assert()
        .failure()
        .stderr(contains("INPUT_FILES"));
    Ok(())
}

#[test]
fn test_non_existent_input_fails() -> Result<(), Box<dyn Error>> {
    // Fails either at the dependency check (no ffmpeg installed) or at
    // per-file validation; both must yield a nonzero exit code.
    vidsqueeze_cmd()
        .arg("surely/this/does/not/exist/input.mp4")
        .assert()
        .failure();
    Ok(())
}

#[test]
fn test_invalid_quality_rejected() -> Result<(), Box<dyn Error>> {
    vidsqueeze_cmd()
        .args(["--quality", "300", "clip.mp4"])
        .assert()
        .failure()
        .stderr(contains("invalid value '300'"));
    Ok(())
}

#[test]
fn test_invalid_resolution_rejected() -> Result<(), Box<dyn Error>> {
    vidsqueeze_cmd()
        .args(["--resolution", "1440p", "clip.mp4"])
        .assert()
        .failure()
        .stderr(contains("unknown resolution"));
    Ok(())
}

#[test]
fn test_lossless_and_quality_conflict() -> Result<(), Box<dyn Error>> {
    vidsqueeze_cmd()
        .args(["--lossless", "--quality", "18", "clip.mp4"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
    Ok(())
}

#[test]
fn test_explicit_output_requires_single_input() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let a = dir.path().join("a.mp4");
    let b = dir.path().join("b.mp4");
    std::fs::write(&a, "dummy content")?;
    std::fs::write(&b, "dummy content")?;

    vidsqueeze_cmd()
        .args(["--output", "out.mp4"])
        .arg(&a)
        .arg(&b)
        .assert()
        .failure()
        .stderr(contains("exactly one input"));
    Ok(())
}

#[test]
fn test_invalid_fps_rejected() -> Result<(), Box<dyn Error>> {
    vidsqueeze_cmd()
        .args(["--fps", "fast", "clip.mp4"])
        .assert()
        .failure()
        .stderr(contains("invalid frame rate"));
    Ok(())
}
