//! Integration tests for the gh-module-sync binary

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a Command for the gh-module-sync binary with a clean environment
fn gh_module_sync() -> Command {
    let mut cmd = Command::cargo_bin("gh-module-sync").unwrap();
    cmd.env_remove("GITHUB_TOKEN")
        .env_remove("GH_MODULE_SYNC_CONFIG");
    cmd
}

#[test]
fn test_help() {
    gh_module_sync()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_missing_token_is_fatal() {
    gh_module_sync()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("GitHub token not configured"))
        .stdout(predicate::str::contains("Synchronizing").not());
}

#[test]
fn test_empty_token_is_fatal() {
    gh_module_sync()
        .env("GITHUB_TOKEN", "   ")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("GitHub token is empty"));
}

#[test]
fn test_token_checked_before_config() {
    // a broken config path would fail too, but the token comes first
    gh_module_sync()
        .args(["--config", "/nonexistent/config.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GitHub token not configured"));
}
