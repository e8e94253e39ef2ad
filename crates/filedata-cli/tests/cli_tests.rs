//! Integration tests for the filedata binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the filedata binary
fn filedata_cmd() -> Command {
    let mut cmd = Command::cargo_bin("filedata").expect("Failed to find filedata binary");
    cmd.env_remove("FILEDATA_LOG");
    cmd
}

fn write(temp: &TempDir, name: &str, content: &str) -> String {
    let path = temp.path().join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_no_command_shows_hint() {
    filedata_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("filedata --help"));
}

#[test]
fn test_formats_lists_builtins() {
    filedata_cmd()
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains(".txt"))
        .stdout(predicate::str::contains(".toml"))
        .stdout(predicate::str::contains(".tsv"));
}

#[test]
fn test_show_renders_toml() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "config.toml", "b = 2\na = 1\n");

    filedata_cmd()
        .args(["show", &file])
        .assert()
        .success()
        .stdout(predicate::str::diff("a = 1\nb = 2\n"));
}

#[test]
fn test_show_unknown_extension_fails() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "data.yaml", "a: 1\n");

    filedata_cmd()
        .args(["show", &file])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_get_value() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "config.toml", "[server]\nports = [80, 443]\n");

    filedata_cmd()
        .args(["get", &file, "server.ports[1]"])
        .assert()
        .success()
        .stdout(predicate::str::diff("443\n"));
}

#[test]
fn test_get_json() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "config.toml", "[server]\nhost = \"localhost\"\n");

    filedata_cmd()
        .args(["get", &file, "server", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"host\": \"localhost\""));
}

#[test]
fn test_get_missing_key_fails() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "config.toml", "a = 1\n");

    filedata_cmd()
        .args(["get", &file, "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key not found"));
}

#[test]
fn test_set_delete_and_entries() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("config.toml").to_string_lossy().into_owned();

    filedata_cmd()
        .args(["set", &file, "name", "demo"])
        .assert()
        .success();
    filedata_cmd()
        .args(["set", &file, "tags", "[\"a\"]"])
        .assert()
        .success();
    filedata_cmd()
        .args(["append", &file, "tags", "\"b\""])
        .assert()
        .success();

    filedata_cmd()
        .args(["entries", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("name"))
        .stdout(predicate::str::contains("tags[1]"));

    filedata_cmd()
        .args(["delete", &file, "name"])
        .assert()
        .success();
    let content = fs::read_to_string(&file).unwrap();
    assert!(!content.contains("name"));
    assert!(content.contains("tags"));
}

#[test]
fn test_append_to_scalar_fails() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "config.toml", "a = 1\n");

    filedata_cmd()
        .args(["append", &file, "a", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an array"));
}

#[test]
fn test_merge_conflict_fails() {
    let temp = TempDir::new().unwrap();
    let left = write(&temp, "left.toml", "a = 1\n");
    let right = write(&temp, "right.toml", "a = 2\n");
    let out = temp.path().join("out.toml").to_string_lossy().into_owned();

    filedata_cmd()
        .args(["merge", &left, &right, "-o", &out])
        .assert()
        .failure()
        .stderr(predicate::str::contains("present in both"));
    assert!(!temp.path().join("out.toml").exists());
}

#[test]
fn test_merge_disjoint() {
    let temp = TempDir::new().unwrap();
    let left = write(&temp, "left.toml", "a = 1\n");
    let right = write(&temp, "right.toml", "b = 2\n");
    let out = temp.path().join("out.toml").to_string_lossy().into_owned();

    filedata_cmd()
        .args(["merge", &left, &right, "-o", &out])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entries"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "a = 1\nb = 2\n");
}

#[test]
fn test_lines() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "notes.txt", "first\nsecond\n");

    filedata_cmd()
        .args(["lines", &file])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 lines"))
        .stdout(predicate::str::contains("second"));
}

#[test]
fn test_lines_rejects_unterminated_file() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "notes.txt", "first\nsecond");

    filedata_cmd()
        .args(["lines", &file])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not terminated"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let temp = TempDir::new().unwrap();
    let file = write(&temp, "notes.txt", "x\n");

    filedata_cmd()
        .args(["-v", "show", &file])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG"));
}
