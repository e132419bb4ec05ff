use assert_cmd::prelude::*;
use predicates::str::contains;
use std::process::Command;

#[test]
fn summary_reports_pillarboxed_fit() {
    let mut cmd = Command::cargo_bin("tv-static").expect("binary exists");
    cmd.args([
        "--summary-only",
        "--viewport",
        "800x480",
        "--content",
        "640x480",
    ]);
    cmd.assert()
        .success()
        .stdout(contains("x=80.0 y=0.0 width=640.0 height=480.0"));
}

#[test]
fn summary_reports_letterboxed_fit() {
    let mut cmd = Command::cargo_bin("tv-static").expect("binary exists");
    cmd.args([
        "--summary-only",
        "--viewport",
        "640x960",
        "--content",
        "640x480",
    ]);
    cmd.assert()
        .success()
        .stdout(contains("x=0.0 y=240.0 width=640.0 height=480.0"));
}

#[test]
fn default_viewport_is_five_times_the_content() {
    let mut cmd = Command::cargo_bin("tv-static").expect("binary exists");
    cmd.args(["--summary-only", "--content", "64x48"]);
    cmd.assert()
        .success()
        .stdout(contains("viewport 320x240"))
        .stdout(contains("width=320.0 height=240.0"));
}

#[test]
fn rejects_unknown_arguments() {
    let mut cmd = Command::cargo_bin("tv-static").expect("binary exists");
    cmd.arg("--frobnicate");
    cmd.assert()
        .failure()
        .stderr(contains("Unknown argument"));
}

#[test]
fn rejects_zero_dimensions() {
    let mut cmd = Command::cargo_bin("tv-static").expect("binary exists");
    cmd.args(["--summary-only", "--viewport", "0x480"]);
    cmd.assert()
        .failure()
        .stderr(contains("dimensions must be positive"));
}

#[test]
fn rejects_malformed_sizes() {
    let mut cmd = Command::cargo_bin("tv-static").expect("binary exists");
    cmd.args(["--summary-only", "--content", "640by480"]);
    cmd.assert().failure().stderr(contains("expected WxH"));
}
