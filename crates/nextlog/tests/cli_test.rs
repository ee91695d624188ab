//! Integration tests for the `nextlog` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! configuration persistence, and error handling. API-backed commands run
//! against a local wiremock server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `nextlog` binary with env isolation.
///
/// Clears all `NEXTDNS_*` / `NEXTLOG_*` env vars and points config
/// directories at `home` so tests never touch the user's real configuration.
fn nextlog_cmd(home: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("nextlog");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("NEXTDNS_API_KEY")
        .env_remove("NEXTDNS_PROFILE")
        .env_remove("NEXTLOG_STORAGE")
        .env_remove("NEXTLOG_OUTPUT")
        .env_remove("NEXTLOG_TIMEZONE")
        .env_remove("NEXTLOG_API_URL")
        .write_stdin("");
    cmd
}

/// Command configured through the environment against `server`.
fn api_cmd(home: &TempDir, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = nextlog_cmd(home);
    cmd.env("NEXTLOG_STORAGE", "memory")
        .env("NEXTDNS_API_KEY", "test-key")
        .env("NEXTDNS_PROFILE", "p1")
        .env("NEXTLOG_API_URL", server.uri());
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Runtime::new().unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = nextlog_cmd(&home).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    nextlog_cmd(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("logs")
            .and(predicate::str::contains("tail"))
            .and(predicate::str::contains("allowlist"))
            .and(predicate::str::contains("summarize")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    nextlog_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nextlog"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    nextlog_cmd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    let home = TempDir::new().unwrap();
    nextlog_cmd(&home)
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Usage errors ────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    let output = nextlog_cmd(&home).arg("foobar").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_storage_backend() {
    let home = TempDir::new().unwrap();
    nextlog_cmd(&home)
        .args(["--storage", "floppy", "config", "path"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("floppy"));
}

#[test]
fn test_settings_patch_rejects_bad_json() {
    let home = TempDir::new().unwrap();
    nextlog_cmd(&home)
        .args(["--storage", "memory", "settings", "patch", "--data", "{nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid JSON"));
}

// ── Missing configuration ───────────────────────────────────────────

#[test]
fn test_logs_without_api_key() {
    let home = TempDir::new().unwrap();
    nextlog_cmd(&home)
        .args(["--storage", "memory", "logs"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("API key is not configured"));
}

#[test]
fn test_logs_without_profile() {
    let home = TempDir::new().unwrap();
    nextlog_cmd(&home)
        .args(["--storage", "memory", "logs"])
        .env("NEXTDNS_API_KEY", "test-key")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no NextDNS profile selected"));
}

#[test]
fn test_purge_requires_yes_without_terminal() {
    let home = TempDir::new().unwrap();
    nextlog_cmd(&home)
        .args(["--storage", "memory", "purge"])
        .env("NEXTDNS_API_KEY", "test-key")
        .env("NEXTDNS_PROFILE", "p1")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires confirmation"));
}

// ── Config persistence ──────────────────────────────────────────────

#[test]
fn test_config_set_then_show_masks_secrets() {
    let home = TempDir::new().unwrap();
    nextlog_cmd(&home)
        .args([
            "config",
            "set",
            "--nextdns-key",
            "abcd1234secret",
            "--profile-id",
            "p42",
            "--time-zone",
            "Europe/Paris",
        ])
        .assert()
        .success();

    let output = nextlog_cmd(&home)
        .args(["config", "show", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let shown: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["api_key"], "****");
    assert_eq!(shown["current_profile"], "p42");
    assert_eq!(shown["time_zone"], "Europe/Paris");
    assert!(!combined_output(&output).contains("abcd1234secret"));
}

#[test]
fn test_flag_overrides_are_not_persisted() {
    let home = TempDir::new().unwrap();
    nextlog_cmd(&home)
        .args(["config", "set", "--time-zone", "UTC"])
        .assert()
        .success();
    nextlog_cmd(&home)
        .args(["--api-key", "flag-key", "profiles", "use", "p7"])
        .assert()
        .success();

    let output = nextlog_cmd(&home)
        .args(["config", "show", "-o", "json"])
        .output()
        .unwrap();
    let shown: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["current_profile"], "p7");
    assert_eq!(shown["api_key"], "");
    assert_eq!(shown["time_zone"], "UTC");
}

#[test]
fn test_config_reset_forgets_values() {
    let home = TempDir::new().unwrap();
    nextlog_cmd(&home)
        .args(["config", "set", "--profile-id", "p1"])
        .assert()
        .success();
    nextlog_cmd(&home)
        .args(["--yes", "config", "reset"])
        .assert()
        .success();
    nextlog_cmd(&home)
        .args(["config", "show", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().or(predicate::str::diff("\n")));
}

#[test]
fn test_config_path_points_at_blob() {
    let home = TempDir::new().unwrap();
    nextlog_cmd(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api-config.json"));
}

// ── API-backed commands ─────────────────────────────────────────────

#[test]
fn test_logs_plain_lists_domains() {
    let home = TempDir::new().unwrap();
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/profiles/p1/logs"))
            .and(query_param("limit", "2"))
            .and(query_param("sort", "desc"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "s1",
                "data": [
                    { "id": "l2", "time": "2024-01-01T00:00:01Z", "domain": "b.example.com", "action": "blocked" },
                    { "id": "l1", "time": "2024-01-01T00:00:00Z", "domain": "a.example.com" }
                ]
            })))
            .expect(1)
            .mount(&server),
    );

    api_cmd(&home, &server)
        .args(["logs", "--limit", "2", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::diff("b.example.com\na.example.com\n"));
}

#[test]
fn test_allowlist_add_replaces_list() {
    let home = TempDir::new().unwrap();
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/profiles/p1/allowlist"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": ["a.com"] })))
            .mount(&server),
    );
    rt.block_on(
        Mock::given(method("PUT"))
            .and(path("/profiles/p1/allowlist"))
            .and(body_json(json!({ "domains": ["a.com", "b.com"] })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server),
    );

    api_cmd(&home, &server)
        .args(["allowlist", "add", " b.com "])
        .assert()
        .success()
        .stderr(predicate::str::contains("2 domains"));
}

#[test]
fn test_rejected_key_exits_with_auth_code() {
    let home = TempDir::new().unwrap();
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/profiles/p1/rewrites"))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server),
    );

    api_cmd(&home, &server)
        .args(["rewrites", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("rejected"));
}

#[test]
fn test_purge_forbidden_exits_with_permission_code() {
    let home = TempDir::new().unwrap();
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        Mock::given(method("DELETE"))
            .and(path("/profiles/p1/logs"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .expect(1)
            .mount(&server),
    );

    api_cmd(&home, &server)
        .args(["--yes", "purge"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("forbidden"));
}
