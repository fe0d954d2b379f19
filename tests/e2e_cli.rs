//! CLI end-to-end tests
//!
//! Tests for the catalog command-line interface.

mod common;

use assert_cmd::prelude::*;
use common::encode_image;
use image::ImageFormat;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the catalog binary
#[allow(deprecated)]
fn catalog_cmd() -> Command {
    Command::cargo_bin("catalog").unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = catalog_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = catalog_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "catalog {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn test_cli_start_help() {
    let mut cmd = catalog_cmd();
    cmd.args(["start", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start the HTTP API server"));
}

#[test]
fn test_cli_inspect_png() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pixel.png");
    fs::write(&path, encode_image(ImageFormat::Png, 5, 7)).unwrap();

    let mut cmd = catalog_cmd();
    cmd.arg("inspect")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("MIME: image/png"))
        .stdout(predicate::str::contains("Accepted: yes"))
        .stdout(predicate::str::contains("Dimensions: 5x7"));
}

#[test]
fn test_cli_inspect_json_rejected_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.gif");
    fs::write(&path, "shopping list").unwrap();

    let output = catalog_cmd()
        .args(["inspect", "--json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["mime"], "text/plain");
    assert_eq!(json["accepted"], false);
}

#[test]
fn test_cli_inspect_missing_file() {
    let mut cmd = catalog_cmd();
    cmd.args(["inspect", "/nonexistent/file.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_validate_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, r#"{"server": {"port": 0}}"#).unwrap();

    let mut cmd = catalog_cmd();
    cmd.arg("validate")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("server.port is 0"));
}

#[test]
fn test_cli_validate_invalid_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let mut cmd = catalog_cmd();
    cmd.arg("validate").arg(&path).assert().failure();
}

#[test]
fn test_cli_validate_defaults() {
    let mut cmd = catalog_cmd();
    cmd.arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("using defaults"))
        .stdout(predicate::str::contains("0.0.0.0:8080"));
}
