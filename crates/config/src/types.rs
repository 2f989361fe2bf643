//! Runtime configuration types for deploydash.
//!
//! Responsibilities:
//! - Define connection settings for the project API (URL, timeout, retries).
//! - Hold the optional API token as a `SecretString`.
//!
//! Does NOT handle:
//! - Loading values from the environment (see `loader` module).
//! - Network connections (see client crate).
//!
//! Invariants:
//! - `base_url` is validated and has no trailing slash once built by `ConfigLoader`.
//! - The API token never appears in `Debug` output.

use secrecy::SecretString;
use std::time::Duration;

use crate::constants::{DEFAULT_API_URL, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS};

/// Connection settings for the project API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Base URL of the project API (e.g., http://localhost:3000)
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries for rate-limited requests
    pub max_retries: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Complete deploydash configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub connection: ConnectionConfig,
    /// Bearer token sent with every API request, if set.
    pub api_token: Option<SecretString>,
}

impl Config {
    /// Create a config pointing at `base_url` with default connection settings.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            connection: ConnectionConfig {
                base_url,
                ..ConnectionConfig::default()
            },
            api_token: None,
        }
    }
}
