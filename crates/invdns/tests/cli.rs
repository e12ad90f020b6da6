// End-to-end tests for the invdns binary. None of these reach a live server.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn invdns() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("invdns");
    cmd.env_remove("INVDNS_CONFIG")
        .env_remove("INVDNS_MODE")
        .env_remove("INVDNS_USERNAME")
        .env_remove("INVDNS_PASSWORD")
        .env_remove("INVDNS_API_VERSION")
        .env("INVDNS_REMOTE", "http://127.0.0.1:1");
    cmd
}

#[test]
fn test_help_lists_record_types() {
    let mut cmd = invdns();
    cmd.arg("--help");
    let mut assert = cmd.assert().success();
    for dtype in ["A", "AAAA", "CNAME", "MX", "PTR", "SRV", "TXT"] {
        assert = assert.stdout(predicate::str::contains(dtype));
    }
}

#[test]
fn test_action_help_shows_record_flags() {
    let mut cmd = invdns();
    cmd.args(["A", "create", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--ip"))
        .stdout(predicate::str::contains("--fqdn"))
        .stdout(predicate::str::contains("--no-private"));
}

#[test]
fn test_missing_domain_and_fqdn_is_usage_error() {
    let mut cmd = invdns();
    cmd.args(["CNAME", "create", "--target", "www.example.com"]);
    cmd.assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("fqdn"));
}

#[test]
fn test_conflicting_view_flags_rejected() {
    let mut cmd = invdns();
    cmd.args([
        "A",
        "create",
        "--domain",
        "example.com",
        "--ip",
        "10.0.0.1",
        "--private",
        "--no-private",
    ]);
    cmd.assert().code(1);
}

#[test]
fn test_dry_run_prints_request_without_sending() {
    let mut cmd = invdns();
    cmd.args([
        "--dry-run",
        "A",
        "create",
        "--domain",
        "example.com",
        "--ip",
        "10.0.0.1",
        "--private",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("DRY-RUN: POST /api/v1_dns/addressrecord/"))
        .stdout(predicate::str::contains("\"ip_type\": \"4\""));
}

#[test]
fn test_dry_run_from_environment_with_json_output() {
    let mut cmd = invdns();
    cmd.env("INVDNS_MODE", "dry-run")
        .args(["PTR", "delete", "--pk", "7", "--format", "json"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"dry_run\": true"))
        .stdout(predicate::str::contains("/api/v1_dns/ptr/7/"));
}

#[test]
fn test_unreachable_server_is_request_failure() {
    let mut cmd = invdns();
    cmd.args(["TXT", "detail", "--pk", "1"]);
    cmd.assert().code(2).stderr(predicate::str::contains("Error"));
}

#[test]
fn test_invalid_remote_is_config_error() {
    let mut cmd = invdns();
    cmd.args(["--remote", "ftp://inventory.example.com", "MX", "detail", "--pk", "3"]);
    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}
