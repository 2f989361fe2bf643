//! `env parse` tests. Offline; no API server involved.

mod common;

use common::{deploydash_cmd, env_file};
use predicates::prelude::*;

const UPLOAD: &str = "\
# database
DATABASE_URL=postgres://localhost/app
API_KEY = 'abc123'
not a variable
CERT=\"-----BEGIN-----
line two
-----END-----\"
";

#[test]
fn test_parse_masks_values_by_default() {
    let file = env_file(UPLOAD);

    deploydash_cmd()
        .args(["env", "parse"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DATABASE_URL"))
        .stdout(predicate::str::contains("••••••••"))
        .stdout(predicate::str::contains("abc123").not())
        .stdout(predicate::str::contains("Parsed 3 entries."))
        .stdout(predicate::str::contains(
            "Skipped lines without a separator: 4",
        ));
}

#[test]
fn test_parse_reveal_json() {
    let file = env_file(UPLOAD);

    let output = deploydash_cmd()
        .args(["-o", "json", "env", "parse", "--reveal"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let vars = value["variables"].as_array().unwrap();
    assert_eq!(vars.len(), 3);
    assert_eq!(vars[1]["key"], "API_KEY");
    assert_eq!(vars[1]["value"], "abc123");
    assert_eq!(
        vars[2]["value"],
        "-----BEGIN-----\nline two\n-----END-----"
    );
    assert_eq!(value["summary"]["skippedLines"][0], 4);
}

#[test]
fn test_parse_does_not_need_connection_settings() {
    let file = env_file("A=1\n");

    deploydash_cmd()
        .env("DEPLOYDASH_API_URL", "not a url")
        .args(["env", "parse"])
        .arg(file.path())
        .assert()
        .success();
}

#[test]
fn test_lenient_parse_reports_dropped_key() {
    let file = env_file("A=1\nB=\"never closed\nstill open\n");

    deploydash_cmd()
        .args(["env", "parse"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Dropped 'B'"));
}

#[test]
fn test_strict_parse_fails_with_validation_exit_code() {
    let file = env_file("A=1\nB=\"super-secret-value\n");

    deploydash_cmd()
        .args(["env", "parse", "--strict"])
        .arg(file.path())
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Unterminated"))
        .stderr(predicate::str::contains("super-secret-value").not());
}

#[test]
fn test_parse_missing_file() {
    deploydash_cmd()
        .args(["env", "parse", "/no/such/file.env"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read"));
}

#[test]
fn test_normalize_crlf_flag() {
    let file = env_file("A=\"x\r\nmid\r\ny\"\r\n");

    let raw = deploydash_cmd()
        .args(["-o", "json", "env", "parse", "--reveal"])
        .arg(file.path())
        .output()
        .unwrap();
    let normalized = deploydash_cmd()
        .args(["-o", "json", "env", "parse", "--reveal", "--normalize-crlf"])
        .arg(file.path())
        .output()
        .unwrap();

    let raw: serde_json::Value = serde_json::from_slice(&raw.stdout).unwrap();
    let normalized: serde_json::Value = serde_json::from_slice(&normalized.stdout).unwrap();
    assert_eq!(raw["variables"][0]["value"], "x\nmid\r\ny");
    assert_eq!(normalized["variables"][0]["value"], "x\nmid\ny");
}

#[test]
fn test_output_file_written() {
    let file = env_file("A=1\n");
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("parsed.json");

    deploydash_cmd()
        .args(["-o", "json", "env", "parse"])
        .arg(file.path())
        .arg("--output-file")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written["variables"][0]["key"], "A");
}
