// File: crates/race-cli/tests/cli.rs
// Purpose: Process-level behavior of `gdp-race --save`: explicit failure without an encoder, GIF with the builtin one.

use std::path::Path;
use std::process::Command;

const CSV: &str = "Country Name,2000,2001\nA,100e9,300e9\nB,200e9,100e9\nC,50e9,250e9\n";

fn write_csv(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("gdp.csv");
    std::fs::write(&path, CSV).expect("write csv");
    path
}

#[test]
fn save_without_encoder_exits_non_zero() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv = write_csv(dir.path());
    let out = dir.path().join("chart.gif");

    let output = Command::new(env!("CARGO_BIN_EXE_gdp-race"))
        .arg(&csv)
        .args(["--save", "--magick", "gdp-race-no-such-encoder", "--width", "200", "--height", "120"])
        .arg("--output")
        .arg(&out)
        .output()
        .expect("spawn gdp-race");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("encoder unavailable"), "stderr: {stderr}");
    assert!(!out.exists());
}

#[test]
fn save_with_builtin_encoder_writes_gif() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv = write_csv(dir.path());
    let out = dir.path().join("chart.gif");

    let status = Command::new(env!("CARGO_BIN_EXE_gdp-race"))
        .arg(&csv)
        .args(["--save", "--encoder", "builtin", "--width", "200", "--height", "120"])
        .arg("--output")
        .arg(&out)
        .status()
        .expect("spawn gdp-race");

    assert!(status.success());
    let bytes = std::fs::read(&out).expect("gif written");
    assert!(bytes.starts_with(b"GIF89a"));
}

#[test]
fn bad_csv_fails_with_context() {
    let dir = tempfile::tempdir().expect("tempdir");
    let csv = dir.path().join("bad.csv");
    std::fs::write(&csv, "Region,2000\nA,1\n").expect("write csv");

    let output = Command::new(env!("CARGO_BIN_EXE_gdp-race"))
        .arg(&csv)
        .arg("--save")
        .output()
        .expect("spawn gdp-race");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load CSV"), "stderr: {stderr}");
    assert!(stderr.contains("expected first column 'Country'"), "stderr: {stderr}");
}
