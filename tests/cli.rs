use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn renders_a_graymap() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("mandel.pnm");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "32x24", "-i", "60", "-t", "1"])
        .args(&["--center=-0.5,0"])
        .assert()
        .success();
    let data = fs::read(&out).unwrap();
    assert!(data.starts_with(b"P5"));
    assert!(data.len() > 32 * 24);
}

#[test]
fn rejects_a_bad_size() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("mandel.pnm");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-s", "0x24"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
}

#[test]
fn rejects_a_non_positive_zoom() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("mandel.pnm");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-z", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Zoom must be a positive number"));
}

#[test]
fn rejects_an_unparsable_zoom_and_thread_count() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("mandel.pnm");
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-z", "wide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse zoom"));
    Command::cargo_bin("mandel")
        .unwrap()
        .args(&["-o", out.to_str().unwrap(), "-t", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Thread count must be between 1 and"));
}
