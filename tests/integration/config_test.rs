//! Integration tests for the config subcommands
//!
//! These rely on `XDG_CONFIG_HOME`, which only Linux honors.
#![cfg(target_os = "linux")]

use std::fs;

use predicates::prelude::*;

use crate::helpers::{strip_ansi, tuivid};

#[test]
fn config_path_is_under_config_home() {
    let (mut cmd, home) = tuivid();
    let output = cmd.args(["config", "path"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let home_path = home.path().display().to_string();
    insta::with_settings!({filters => vec![(home_path.as_str(), "[CONFIG_HOME]")]}, {
        insta::assert_snapshot!(stdout.trim(), @"[CONFIG_HOME]/tuivid/config.toml");
    });
}

#[test]
fn config_show_without_file_prints_defaults() {
    let (mut cmd, _home) = tuivid();
    let output = cmd.args(["config", "show"]).output().unwrap();
    assert!(output.status.success());

    let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
    assert!(stdout.contains("[player]"), "{}", stdout);
    assert!(stdout.contains("image_type = \"sixel\""), "{}", stdout);
    assert!(stdout.contains("update_strategy = \"reactive\""), "{}", stdout);
    assert!(stdout.contains("[log]"), "{}", stdout);
}

#[test]
fn config_show_reflects_file() {
    let (mut cmd, home) = tuivid();
    let dir = home.path().join("tuivid");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.toml"),
        "[player]\nimage_type = \"unicode\"\nupdate_strategy = \"replace-widget\"\n",
    )
    .unwrap();

    let output = cmd.args(["config", "show"]).output().unwrap();
    let stdout = strip_ansi(&String::from_utf8_lossy(&output.stdout));
    assert!(stdout.contains("image_type = \"unicode\""), "{}", stdout);
    assert!(stdout.contains("update_strategy = \"remount\""), "{}", stdout);
    assert!(stdout.contains("speed = 1.0"), "{}", stdout);
}

#[test]
fn broken_config_is_reported() {
    let (mut cmd, home) = tuivid();
    let dir = home.path().join("tuivid");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), "[player\n").unwrap();

    cmd.args(["config", "show"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn config_init_writes_defaults_once() {
    let (mut cmd, home) = tuivid();
    cmd.args(["config", "init"]).assert().success();
    let path = home.path().join("tuivid").join("config.toml");
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("fps_decrease_factor = 1"));

    let (mut again, _other) = tuivid();
    again
        .env("XDG_CONFIG_HOME", home.path())
        .args(["config", "init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--force"));

    let (mut forced, _other) = tuivid();
    forced
        .env("XDG_CONFIG_HOME", home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn config_values_feed_validation() {
    let (mut cmd, home) = tuivid();
    let dir = home.path().join("tuivid");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.toml"),
        "[player]\nimage_type = \"tgp\"\nupdate_strategy = \"set-image\"\n",
    )
    .unwrap();

    cmd.args(["play", "/nonexistent/clip.mp4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("only supports sixel"));
}
