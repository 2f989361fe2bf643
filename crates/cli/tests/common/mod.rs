//! Shared test utilities for deploydash integration tests.
//!
//! Invariants / Assumptions:
//! - Every command built here is hermetic: no `.env` loading, no host
//!   `DEPLOYDASH_*` variables.
//! - Retries are disabled so error-path tests do not sleep.

use assert_cmd::Command;
use std::io::Write;

/// Returns a hermetic `deploydash` command.
pub fn deploydash_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("deploydash");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("DEPLOYDASH_MAX_RETRIES", "0");
    cmd.env_remove("DEPLOYDASH_API_URL")
        .env_remove("DEPLOYDASH_API_TOKEN")
        .env_remove("DEPLOYDASH_TIMEOUT")
        .env_remove("RUST_LOG");

    cmd
}

/// Hermetic command pointed at `api_url`.
#[allow(dead_code)]
pub fn deploydash_cmd_with_api(api_url: &str) -> Command {
    let mut cmd = deploydash_cmd();
    cmd.env("DEPLOYDASH_API_URL", api_url);
    cmd
}

/// Write `content` to a temp file that lives as long as the handle.
#[allow(dead_code)]
pub fn env_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".env")
        .tempfile()
        .expect("create temp env file");
    file.write_all(content.as_bytes())
        .expect("write temp env file");
    file
}
