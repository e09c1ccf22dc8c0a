//! Integration tests for unarc-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;
use unarc_core::test_utils::TarFixture;
use unarc_core::test_utils::write_test_zip;

fn unarc_cmd() -> Command {
    cargo_bin_cmd!("unarc")
}

#[test]
fn test_version_flag() {
    unarc_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("unarc"));
}

#[test]
fn test_help_flag() {
    unarc_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line front end"));
}

#[test]
fn test_extract_help() {
    unarc_cmd()
        .arg("extract")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extract archive contents"));
}

#[test]
fn test_extract_creates_files() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("bundle.zip");
    write_test_zip(&archive, &[("sample.txt", b"sample content")]);
    let dest = temp.path().join("out");

    unarc_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction complete"));

    assert_eq!(
        std::fs::read(dest.join("sample.txt")).unwrap(),
        b"sample content"
    );
}

#[test]
fn test_extract_tar_gz() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("bundle.tar.gz");
    TarFixture::new()
        .dir("docs/")
        .file("docs/readme.txt", b"hello tar")
        .write_gz(&archive);
    let dest = temp.path().join("out");

    unarc_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success();

    assert_eq!(
        std::fs::read(dest.join("docs/readme.txt")).unwrap(),
        b"hello tar"
    );
}

#[test]
fn test_extract_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("bundle.zip");
    write_test_zip(&archive, &[("a.txt", b"1"), ("b.txt", b"2")]);
    let dest = temp.path().join("out");

    let output = unarc_cmd()
        .arg("extract")
        .arg("--json")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "success");
    assert_eq!(json["operation"], "extract");
    assert_eq!(json["data"]["files_extracted"], 2);
}

#[test]
fn test_extract_quiet_suppresses_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("bundle.zip");
    write_test_zip(&archive, &[("a.txt", b"1")]);
    let dest = temp.path().join("out");

    unarc_cmd()
        .arg("extract")
        .arg("--quiet")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_extract_nonexistent_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");

    unarc_cmd()
        .arg("extract")
        .arg("nonexistent.tar.gz")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_extract_rar_fails_with_hint() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("bundle.rar");
    std::fs::write(&archive, b"Rar!\x1a\x07\x00").unwrap();

    unarc_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("RAR"));
}

#[test]
fn test_create_builds_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = temp.path().join("notes.txt");
    std::fs::write(&source, b"notes content").unwrap();
    let output = temp.path().join("out.zip");

    unarc_cmd()
        .arg("create")
        .arg(&output)
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created"));

    assert!(output.is_file());
}

#[test]
fn test_create_with_password_warns() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = temp.path().join("secret.txt");
    std::fs::write(&source, b"secret").unwrap();
    let output = temp.path().join("out.zip");

    unarc_cmd()
        .arg("create")
        .arg(&output)
        .arg(&source)
        .arg("--password")
        .arg("hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("WITHOUT protection"));
}

#[test]
fn test_create_json_reports_password_warning() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = temp.path().join("secret.txt");
    std::fs::write(&source, b"secret").unwrap();
    let output = temp.path().join("out.zip");

    let stdout = unarc_cmd()
        .arg("create")
        .arg("--json")
        .arg(&output)
        .arg(&source)
        .arg("--password")
        .arg("hunter2")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&stdout).expect("invalid JSON output");
    assert_eq!(json["operation"], "create");
    assert_eq!(json["data"]["files_added"], 1);
    assert!(
        json["data"]["warnings"][0]
            .as_str()
            .unwrap()
            .contains("password")
    );
}

#[test]
fn test_create_requires_sources() {
    let temp = TempDir::new().expect("failed to create temp dir");

    unarc_cmd()
        .arg("create")
        .arg(temp.path().join("out.zip"))
        .assert()
        .failure();
}

#[test]
fn test_list_shows_entry_names() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("bundle.zip");
    write_test_zip(&archive, &[("first.txt", b"1"), ("docs/second.txt", b"2")]);

    unarc_cmd()
        .arg("list")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("first.txt"))
        .stdout(predicate::str::contains("docs/second.txt"));
}

#[test]
fn test_list_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("bundle.zip");
    write_test_zip(&archive, &[("only.txt", b"data")]);

    let stdout = unarc_cmd()
        .arg("list")
        .arg("--json")
        .arg(&archive)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&stdout).expect("invalid JSON output");
    assert_eq!(json["operation"], "list");
    assert_eq!(json["data"]["total_entries"], 1);
    assert_eq!(json["data"]["entries"][0]["name"], "only.txt");
}

#[test]
fn test_list_does_not_extract() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("bundle.zip");
    write_test_zip(&archive, &[("file.txt", b"data")]);

    unarc_cmd()
        .arg("list")
        .arg(&archive)
        .current_dir(temp.path())
        .assert()
        .success();

    assert!(!temp.path().join("file.txt").exists());
}
