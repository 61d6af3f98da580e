//! Integration tests for the PassVault CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Interactive prompts are avoided by passing the master password
//! through `PASSVAULT_PASSWORD`, usernames with `-u`, and entry
//! passwords on stdin.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

const MASTER: &str = "correcthorse";

/// Helper: get a Command pointing at the passvault binary.
fn passvault() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("passvault").expect("binary should exist");
    cmd.env_remove("PASSVAULT_DIR")
        .env_remove("PASSVAULT_PASSWORD")
        .env_remove("PASSVAULT_LOG");
    cmd
}

/// Helper: a command bound to `tmp` with the master password in the env.
fn passvault_in(tmp: &TempDir) -> Command {
    let mut cmd = passvault();
    cmd.arg("--vault-dir")
        .arg(tmp.path())
        .env("PASSVAULT_PASSWORD", MASTER);
    cmd
}

fn init_vault(tmp: &TempDir) {
    passvault_in(tmp).arg("init").assert().success();
}

fn add_entry(tmp: &TempDir, service: &str, username: &str, password: &str) {
    passvault_in(tmp)
        .args(["add", service, "-u", username, "--force"])
        .write_stdin(format!("{password}\n"))
        .assert()
        .success();
}

#[test]
fn help_flag_shows_usage() {
    passvault()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local encrypted password vault"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("backup-info"));
}

#[test]
fn version_flag_shows_version() {
    passvault()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault"));
}

#[test]
fn no_args_shows_help() {
    passvault()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn generate_prints_password_of_requested_length() {
    let tmp = TempDir::new().unwrap();
    let output = passvault()
        .arg("--vault-dir")
        .arg(tmp.path())
        .args(["generate", "--length", "16", "--no-symbols"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let first = stdout.lines().next().unwrap();
    assert_eq!(first.chars().count(), 16);
    assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn generate_rejects_zero_length() {
    let tmp = TempDir::new().unwrap();
    passvault()
        .arg("--vault-dir")
        .arg(tmp.path())
        .args(["generate", "--length", "0"])
        .assert()
        .failure();
}

#[test]
fn init_creates_key_and_vault_files() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    tmp.child("vault.key").assert(predicate::path::exists());
    tmp.child("passvault.vault").assert(predicate::path::exists());
}

#[test]
fn init_twice_fails() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    passvault_in(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn init_rejects_short_master_password() {
    let tmp = TempDir::new().unwrap();
    passvault()
        .arg("--vault-dir")
        .arg(tmp.path())
        .env("PASSVAULT_PASSWORD", "abc")
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 6"));

    tmp.child("vault.key").assert(predicate::path::missing());
}

#[test]
fn add_then_get_shows_password() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, "example.com", "alice", "s3cret-pw");

    passvault_in(&tmp)
        .args(["get", "example", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("example.com"))
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("s3cret-pw"));
}

#[test]
fn get_hides_password_without_show() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, "example.com", "alice", "s3cret-pw");

    passvault_in(&tmp)
        .args(["get", "EXAMPLE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("example.com"))
        .stdout(predicate::str::contains("s3cret-pw").not());
}

#[test]
fn get_unknown_service_fails() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    passvault_in(&tmp)
        .args(["get", "nothing-here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry"));
}

#[test]
fn list_shows_every_service() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, "example.com", "alice", "pw-one");
    add_entry(&tmp, "github.com", "bob", "pw-two");

    passvault_in(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total accounts: 2"))
        .stdout(predicate::str::contains("example.com"))
        .stdout(predicate::str::contains("github.com"))
        .stdout(predicate::str::contains("pw-one").not());
}

#[test]
fn delete_with_force_removes_entry() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, "example.com", "alice", "s3cret-pw");

    passvault_in(&tmp)
        .args(["delete", "example.com", "--force"])
        .assert()
        .success();

    passvault_in(&tmp)
        .args(["get", "example.com"])
        .assert()
        .failure();
}

#[test]
fn delete_unknown_service_fails() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    passvault_in(&tmp)
        .args(["delete", "missing.com", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.com"));
}

#[test]
fn wrong_master_password_fails() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);

    passvault()
        .arg("--vault-dir")
        .arg(tmp.path())
        .env("PASSVAULT_PASSWORD", "definitely-wrong")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect master password"));
}

#[test]
fn status_without_vault_suggests_init() {
    let tmp = TempDir::new().unwrap();

    passvault()
        .arg("--vault-dir")
        .arg(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault init"));
}

#[test]
fn status_count_reports_entries() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, "example.com", "alice", "s3cret-pw");

    passvault_in(&tmp)
        .args(["status", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total entries:  1"))
        .stdout(predicate::str::contains("PBKDF2"));
}

#[test]
fn backup_info_names_both_files() {
    let tmp = TempDir::new().unwrap();

    passvault()
        .arg("--vault-dir")
        .arg(tmp.path())
        .args(["backup-info", "--write"])
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault.vault"))
        .stdout(predicate::str::contains("vault.key"));

    tmp.child("BACKUP_INFO.txt").assert(predicate::path::exists());
}

#[test]
fn completions_for_bash() {
    passvault()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("passvault"));
}

#[test]
fn vault_files_never_contain_plaintext() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, "example.com", "alice", "VERY_DISTINCT_SECRET");

    for name in ["passvault.vault", "vault.key"] {
        let raw = std::fs::read(tmp.child(name).path()).unwrap();
        assert!(
            !String::from_utf8_lossy(&raw).contains("VERY_DISTINCT_SECRET"),
            "{name} leaks the entry password"
        );
    }
}

#[test]
fn padded_service_name_can_be_deleted() {
    let tmp = TempDir::new().unwrap();
    init_vault(&tmp);
    add_entry(&tmp, " padded.com ", "alice", "s3cret-pw");

    passvault_in(&tmp)
        .args(["delete", " padded.com ", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted login for 'padded.com'"));
}
