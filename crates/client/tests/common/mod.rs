//! Common test utilities for client integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - All fixture files must be valid JSON

use std::path::PathBuf;

#[allow(unused_imports)]
pub use deploydash_client::{ClientError, DeployClient, endpoints};
#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// Load a JSON fixture by path relative to `fixtures/`.
///
/// Returned as text: going through `serde_json::Value` would sort object keys
/// and hide ordering bugs.
#[allow(dead_code)]
pub fn load_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name);
    let raw = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
    serde_json::from_str::<serde_json::Value>(&raw)
        .unwrap_or_else(|e| panic!("invalid JSON in fixture {}: {e}", path.display()));
    raw
}

/// 200 response carrying a fixture verbatim.
#[allow(dead_code)]
pub fn fixture_response(name: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(load_fixture(name), "application/json")
}

/// Client pointed at the mock server, with the given retry budget.
#[allow(dead_code)]
pub fn client_for(server: &MockServer, max_retries: usize) -> DeployClient {
    DeployClient::builder()
        .base_url(server.uri())
        .max_retries(max_retries)
        .build()
        .expect("client should build")
}
