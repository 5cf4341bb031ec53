//! CLI integration tests for vaani-scan

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Known denominations the stub identifier can produce.
const DENOMINATIONS: [&str; 7] = [
    "10 rupees",
    "20 rupees",
    "50 rupees",
    "100 rupees",
    "200 rupees",
    "500 rupees",
    "2000 rupees",
];

/// Create an isolated config (own preference db, speech and haptics off)
/// plus a fake JPEG to scan.
fn setup_test_env() -> (TempDir, String, String) {
    let temp_dir = TempDir::new().unwrap();

    let db_path = temp_dir.path().join("prefs.db");
    let config_path = temp_dir.path().join("config.toml");
    let config_content = format!(
        r#"
[storage]
path = "{}"

[speech]
enabled = false
rate = 1.0
pitch = 1.0
volume = 1.0

[haptics]
enabled = false
"#,
        db_path.to_string_lossy()
    );
    fs::write(&config_path, config_content).unwrap();

    let image_path = temp_dir.path().join("banknote.jpg");
    fs::write(&image_path, [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap();

    (
        temp_dir,
        config_path.to_string_lossy().to_string(),
        image_path.to_string_lossy().to_string(),
    )
}

#[test]
fn test_help_flag_output() {
    let mut cmd = Command::cargo_bin("vaani-scan").unwrap();

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Identify a banknote image and print its denomination",
        ))
        .stdout(predicate::str::contains("--language"))
        .stdout(predicate::str::contains("--speak"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_scan_prints_a_denomination() {
    let (_tmp, config, image) = setup_test_env();

    let mut cmd = Command::cargo_bin("vaani-scan").unwrap();
    let output = cmd
        .env("VAANI_CONFIG", &config)
        .arg(&image)
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let label = stdout.trim();
    assert!(
        DENOMINATIONS.contains(&label),
        "unexpected label: {}",
        label
    );
}

#[test]
fn test_json_output_shape() {
    let (_tmp, config, image) = setup_test_env();

    let mut cmd = Command::cargo_bin("vaani-scan").unwrap();
    let output = cmd
        .env("VAANI_CONFIG", &config)
        .args([&image, "--format", "json", "--language", "tamil"])
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();

    assert!(json["scan_id"].as_str().is_some());
    assert_eq!(json["language"], "tamil");
    let label = json["label"].as_str().unwrap();
    assert!(DENOMINATIONS.contains(&label));
    assert!(json["identified_at"].as_i64().is_some());
}

#[test]
fn test_missing_image_fails_with_capture_error() {
    let (_tmp, config, _image) = setup_test_env();

    let mut cmd = Command::cargo_bin("vaani-scan").unwrap();
    cmd.env("VAANI_CONFIG", &config)
        .arg("/nonexistent/banknote.jpg")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("image not found"));
}

#[test]
fn test_invalid_language_is_rejected() {
    let (_tmp, config, image) = setup_test_env();

    let mut cmd = Command::cargo_bin("vaani-scan").unwrap();
    cmd.env("VAANI_CONFIG", &config)
        .args([&image, "--language", "klingon"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Invalid language"));
}

#[test]
fn test_invalid_format_is_rejected() {
    let (_tmp, config, image) = setup_test_env();

    let mut cmd = Command::cargo_bin("vaani-scan").unwrap();
    cmd.env("VAANI_CONFIG", &config)
        .args([&image, "--format", "yaml"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("unknown output format"));
}
