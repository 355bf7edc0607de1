use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd(temp_dir: &TempDir) -> Command {
  let mut cmd = Command::cargo_bin("make-env-file").unwrap();
  cmd
    .current_dir(temp_dir.path())
    .env_remove("RUST_LOG")
    .env_remove("MAKE_ENV_SOURCE")
    .env_remove("MAKE_ENV_DEST")
    .env_remove("MAKE_ENV_OVERWRITE")
    .env_remove("MAKE_ENV_SLEEP");
  cmd
}

#[test]
fn test_help_output() {
  let temp_dir = TempDir::new().unwrap();
  cmd(&temp_dir)
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("--source"))
    .stdout(predicate::str::contains("--dest"))
    .stdout(predicate::str::contains("--overwrite"))
    .stdout(predicate::str::contains("--sleep"));
}

#[test]
fn test_defaults_create_dot_env() {
  let temp_dir = TempDir::new().unwrap();
  fs::write(temp_dir.path().join(".env.example"), "A=1\nB=2\n").unwrap();

  cmd(&temp_dir).assert().success();

  assert_eq!(
    fs::read_to_string(temp_dir.path().join(".env")).unwrap(),
    "A=1\nB=2\n"
  );
}

#[test]
fn test_divergence_is_reported_and_exits_zero() {
  let temp_dir = TempDir::new().unwrap();
  fs::write(temp_dir.path().join(".env.example"), "A=1\nB=2\n").unwrap();
  fs::write(temp_dir.path().join(".env"), "A=1\nB=9\nC=3\n").unwrap();

  cmd(&temp_dir)
    .assert()
    .success()
    .stderr(predicate::str::contains("B is different"))
    .stderr(predicate::str::contains("C is not in source config"));

  assert_eq!(
    fs::read_to_string(temp_dir.path().join(".env")).unwrap(),
    "A=1\nB=9\nC=3\n"
  );
}

#[test]
fn test_overwrite_flag() {
  let temp_dir = TempDir::new().unwrap();
  fs::write(temp_dir.path().join("template.env"), "A=1\nB=2\n").unwrap();
  fs::write(temp_dir.path().join("local.env"), "A=1\nB=9\nC=3\n").unwrap();

  cmd(&temp_dir)
    .args(["--source", "template.env", "--dest", "local.env", "--overwrite"])
    .assert()
    .success();

  assert_eq!(
    fs::read_to_string(temp_dir.path().join("local.env")).unwrap(),
    "A=1\nB=2\n"
  );
}

#[test]
fn test_overwrite_from_environment() {
  let temp_dir = TempDir::new().unwrap();
  fs::write(temp_dir.path().join(".env.example"), "A=1\n").unwrap();
  fs::write(temp_dir.path().join(".env"), "A=2\n").unwrap();

  cmd(&temp_dir)
    .env("MAKE_ENV_OVERWRITE", "true")
    .assert()
    .success();

  assert_eq!(
    fs::read_to_string(temp_dir.path().join(".env")).unwrap(),
    "A=1\n"
  );
}

#[test]
fn test_missing_source_fails() {
  let temp_dir = TempDir::new().unwrap();

  cmd(&temp_dir)
    .assert()
    .failure()
    .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_malformed_line_fails() {
  let temp_dir = TempDir::new().unwrap();
  fs::write(temp_dir.path().join(".env.example"), "A=1\nbroken\n").unwrap();

  cmd(&temp_dir)
    .assert()
    .failure()
    .stderr(predicate::str::contains("line 2"));

  assert!(!temp_dir.path().join(".env").exists());
}

#[test]
fn test_negative_sleep_fails() {
  let temp_dir = TempDir::new().unwrap();
  fs::write(temp_dir.path().join(".env.example"), "A=1\n").unwrap();

  cmd(&temp_dir)
    .args(["--sleep", "-1"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("sleep must be a positive value"));

  assert!(!temp_dir.path().join(".env").exists());
}
