//! Shared helpers for integration tests

use assert_cmd::Command;
use tempfile::TempDir;

/// A tuivid command isolated from the user's config.
///
/// The returned directory is used as `XDG_CONFIG_HOME` and must outlive
/// the command.
pub fn tuivid() -> (Command, TempDir) {
    let config_home = TempDir::new().expect("Failed to create temp dir");
    let mut cmd = Command::cargo_bin("tuivid").expect("tuivid binary not built");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("TUIVID_LOG");
    (cmd, config_home)
}

/// Remove ANSI color codes from CLI output.
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
