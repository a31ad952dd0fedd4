//! Integration tests for configuration layering.
//!
//! Tests the priority chain: hardcoded defaults < XDG config < project
//! config < CLI args. XDG lookups are isolated via `XDG_CONFIG_HOME`.

#![allow(clippy::unwrap_used)] // Test code uses unwrap for brevity
#![allow(deprecated)] // cargo_bin deprecation warning

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use image::GenericImageView;
use webpify_test_support::SyntheticImage;

fn webpify(cwd: &Path, xdg: &Path) -> Command {
    let mut cmd = Command::cargo_bin("webpify").unwrap();
    cmd.current_dir(cwd).env("XDG_CONFIG_HOME", xdg);
    cmd
}

fn output_width(dir: &Path, name: &str) -> u32 {
    image::open(dir.join(name)).unwrap().dimensions().0
}

#[test]
fn test_hardcoded_default_without_any_config() {
    let temp = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    SyntheticImage::opaque_gradient(800, 400)
        .save(temp.path().join("pic.png"))
        .unwrap();

    webpify(temp.path(), xdg.path())
        .arg("pic.png")
        .assert()
        .success();

    assert_eq!(output_width(temp.path(), "pic.webp"), 300);
}

#[test]
fn test_project_config_applies_width() {
    let temp = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    SyntheticImage::opaque_gradient(800, 400)
        .save(temp.path().join("pic.png"))
        .unwrap();
    fs::write(
        temp.path().join(".webpify.toml"),
        "[optimize]\nmax_width = 150\n",
    )
    .unwrap();

    webpify(temp.path(), xdg.path())
        .arg("pic.png")
        .assert()
        .success();

    assert_eq!(output_width(temp.path(), "pic.webp"), 150);
}

#[test]
fn test_cli_flag_overrides_project_config() {
    let temp = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    SyntheticImage::opaque_gradient(800, 400)
        .save(temp.path().join("pic.png"))
        .unwrap();
    fs::write(
        temp.path().join(".webpify.toml"),
        "[optimize]\nmax_width = 150\n",
    )
    .unwrap();

    webpify(temp.path(), xdg.path())
        .arg("pic.png")
        .arg("--width")
        .arg("200")
        .assert()
        .success();

    assert_eq!(output_width(temp.path(), "pic.webp"), 200);
}

#[test]
fn test_xdg_config_applies_when_no_project_config() {
    let temp = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    SyntheticImage::opaque_gradient(800, 400)
        .save(temp.path().join("pic.png"))
        .unwrap();

    let config_dir = xdg.path().join("webpify");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[optimize]\nmax_width = 120\n").unwrap();

    webpify(temp.path(), xdg.path())
        .arg("pic.png")
        .assert()
        .success();

    assert_eq!(output_width(temp.path(), "pic.webp"), 120);
}

#[test]
fn test_project_config_overrides_xdg() {
    let temp = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    SyntheticImage::opaque_gradient(800, 400)
        .save(temp.path().join("pic.png"))
        .unwrap();

    let config_dir = xdg.path().join("webpify");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "[optimize]\nmax_width = 120\n").unwrap();
    fs::write(
        temp.path().join(".webpify.toml"),
        "[optimize]\nmax_width = 180\n",
    )
    .unwrap();

    webpify(temp.path(), xdg.path())
        .arg("pic.png")
        .assert()
        .success();

    assert_eq!(output_width(temp.path(), "pic.webp"), 180);
}

#[test]
fn test_config_sets_output_format() {
    let temp = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    SyntheticImage::opaque_gradient(64, 64)
        .save(temp.path().join("pic.png"))
        .unwrap();
    fs::write(temp.path().join(".webpify.toml"), "[output]\nformat = 'jsonl'\n").unwrap();

    let output = webpify(temp.path(), xdg.path())
        .arg("pic.png")
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().find(|l| !l.trim().is_empty()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(parsed["success"], true);
}

#[test]
fn test_invalid_config_value_warns_and_continues() {
    let temp = tempfile::tempdir().unwrap();
    let xdg = tempfile::tempdir().unwrap();
    SyntheticImage::opaque_gradient(64, 64)
        .save(temp.path().join("pic.png"))
        .unwrap();
    fs::write(temp.path().join(".webpify.toml"), "[optimize]\nquality = 150\n").unwrap();

    // Warned about, but the run itself still works on defaults.
    webpify(temp.path(), xdg.path())
        .arg("pic.png")
        .assert()
        .stderr(predicates::str::contains("warning"));
}
