//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn tally() -> Command {
    tally_in("tally-smoke")
}

/// Run from a scratch directory that doubles as HOME, so only .env files
/// the test writes there are picked up.
fn tally_in(dir: &str) -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    let scratch = std::env::temp_dir().join(dir);
    std::fs::create_dir_all(&scratch).unwrap();
    cmd.current_dir(&scratch)
        .env("HOME", &scratch)
        .env_remove("DATABASE_URL")
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_serve() {
    tally()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn test_serve_help() {
    tally()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--bootstrap-schema"))
        .stdout(predicate::str::contains("--port"));
}

#[test]
fn test_version() {
    tally()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_serve_without_credentials_fails() {
    tally()
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL"));
}

#[test]
fn test_serve_rejects_bad_port() {
    tally()
        .args(["serve", "--port", "not-a-port"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_rust_log_from_dotenv_is_honoured() {
    let scratch = std::env::temp_dir().join("tally-smoke-dotenv");
    std::fs::create_dir_all(&scratch).unwrap();
    std::fs::write(scratch.join(".env"), "RUST_LOG=debug\n").unwrap();

    tally_in("tally-smoke-dotenv")
        .arg("serve")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Loaded .env from current directory"));
}
