// ABOUTME: Integration tests for the kiln CLI.
// ABOUTME: Validates usage errors and end-to-end runs against a stub project.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn kiln_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("kiln"))
}

/// A project whose tools are stubbed with coreutils: build just creates the
/// ELF, download and debug are no-ops.
fn write_stub_project(dir: &Path) {
    fs::write(
        dir.join("kiln.yml"),
        r#"
name: demo
targets:
  - name: blinky
    app: apps/blinky
    build: ["touch", "bin/targets/blinky/app.elf"]
    download: ["true"]
    debug: ["true"]
"#,
    )
    .unwrap();
    fs::create_dir_all(dir.join("apps/blinky")).unwrap();
}

#[test]
fn help_shows_run() {
    kiln_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"));
}

#[test]
fn run_without_target_reports_usage() {
    let temp_dir = tempfile::tempdir().unwrap();

    kiln_cmd()
        .current_dir(temp_dir.path())
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must specify target"))
        .stderr(predicate::str::contains("Usage: kiln run"));
}

#[test]
fn run_with_unknown_target_embeds_the_name() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_stub_project(temp_dir.path());

    kiln_cmd()
        .current_dir(temp_dir.path())
        .args(["run", "bogus_target"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown target: bogus_target"));
}

#[test]
fn run_without_project_file_reports_discovery_failure() {
    let temp_dir = tempfile::tempdir().unwrap();

    kiln_cmd()
        .current_dir(temp_dir.path())
        .args(["run", "blinky"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("project file not found"));
}

#[test]
fn run_without_version_removes_stale_image() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_stub_project(temp_dir.path());

    let bin_dir = temp_dir.path().join("bin/targets/blinky");
    fs::create_dir_all(&bin_dir).unwrap();
    let stale_img = bin_dir.join("app.img");
    fs::write(&stale_img, b"stale image from an earlier versioned run").unwrap();

    kiln_cmd()
        .current_dir(temp_dir.path())
        .args(["run", "blinky"])
        .assert()
        .success();

    assert!(
        !stale_img.exists(),
        "stale app.img should not survive an unversioned run"
    );
    assert!(bin_dir.join("app.elf").exists(), "build should have run");
    assert!(
        !bin_dir.join("manifest.json").exists(),
        "no manifest without a version"
    );
}

#[test]
fn run_with_version_generates_image_and_manifest() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_stub_project(temp_dir.path());

    kiln_cmd()
        .current_dir(temp_dir.path())
        .args(["run", "blinky", "1.2.3"])
        .assert()
        .success();

    let bin_dir = temp_dir.path().join("bin/targets/blinky");
    let img = bin_dir.join("app.img");
    assert!(img.exists(), "versioned run should generate app.img");
    // the stub build produces an empty ELF, so the image is header-only
    assert_eq!(fs::metadata(&img).unwrap().len(), 24);

    let manifest = fs::read_to_string(bin_dir.join("manifest.json")).unwrap();
    assert!(manifest.contains("\"version\": \"1.2.3.0\""));
    assert!(manifest.contains("\"name\": \"blinky\""));
}

#[test]
fn run_with_malformed_version_fails_before_download() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_stub_project(temp_dir.path());

    kiln_cmd()
        .current_dir(temp_dir.path())
        .args(["run", "blinky", "not-a-version"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid version component"));
}
