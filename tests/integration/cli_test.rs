//! Integration tests for argument handling and fail-fast validation

use predicates::prelude::*;

use crate::helpers::tuivid;

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let (mut cmd, _home) = tuivid();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("demo"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn play_help_shows_playback_flags() {
    let (mut cmd, _home) = tuivid();
    cmd.args(["play", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<FILE>"))
        .stdout(predicate::str::contains("--image-type"))
        .stdout(predicate::str::contains("--update-strategy"))
        .stdout(predicate::str::contains("--fps-decrease-factor"));
}

#[test]
fn version_shows_package_version() {
    let (mut cmd, _home) = tuivid();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Usage errors
// ============================================================================

#[test]
fn play_without_file_is_usage_error() {
    let (mut cmd, _home) = tuivid();
    cmd.arg("play")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<FILE>"));
}

#[test]
fn unknown_image_type_is_usage_error() {
    let (mut cmd, _home) = tuivid();
    cmd.args(["play", "clip.mp4", "--image-type", "ascii"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("sixel"));
}

// ============================================================================
// Fail-fast validation (before the terminal is touched)
// ============================================================================

#[test]
fn set_image_with_halfcell_fails_fast() {
    let (mut cmd, _home) = tuivid();
    cmd.args([
        "play",
        "/nonexistent/clip.mp4",
        "--update-strategy",
        "set-image",
        "--image-type",
        "halfcell",
    ])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("only supports sixel"))
    .stderr(predicate::str::contains("halfcell"));
}

#[test]
fn zero_speed_is_rejected() {
    let (mut cmd, _home) = tuivid();
    cmd.args(["play", "/nonexistent/clip.mp4", "--speed", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("speed must be a positive number"));
}

#[test]
fn zero_fps_decrease_factor_is_rejected() {
    let (mut cmd, _home) = tuivid();
    cmd.args(["play", "/nonexistent/clip.mp4", "-f", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn play_missing_file_reports_not_found() {
    let (mut cmd, _home) = tuivid();
    cmd.args(["play", "/nonexistent/clip.mp4", "--image-type", "unicode"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found: /nonexistent/clip.mp4"));
}

#[test]
fn info_missing_file_reports_not_found() {
    let (mut cmd, _home) = tuivid();
    cmd.args(["info", "/nonexistent/clip.mp4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn info_on_text_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.mp4");
    std::fs::write(&path, "not a video").unwrap();

    let (mut cmd, _home) = tuivid();
    cmd.arg("info").arg(&path).assert().code(1);
}

#[test]
fn demo_rejects_empty_pattern() {
    let (mut cmd, _home) = tuivid();
    cmd.args(["demo", "--width", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at least 1x1"));
}

#[test]
fn demo_rejects_zero_fps() {
    let (mut cmd, _home) = tuivid();
    cmd.args(["demo", "--fps", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid frame rate"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn bash_completions_mention_binary() {
    let (mut cmd, _home) = tuivid();
    cmd.args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tuivid"));
}
