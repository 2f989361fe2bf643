//! Builder for [`DeployClient`].
//!
//! Responsibilities:
//! - Fluent configuration of base URL, token, timeout and retry budget.
//! - Normalizing the base URL (no trailing slashes).
//! - Configuring the underlying `reqwest::Client`.
//!
//! Does NOT handle:
//! - Validating user-supplied URLs (the config loader does that before we get here).

use std::time::Duration;

use deploydash_config::{
    Config,
    constants::{DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECS},
};
use secrecy::SecretString;

use crate::client::DeployClient;
use crate::error::{ClientError, Result};

/// Builder for creating a new [`DeployClient`].
///
/// ```rust,ignore
/// let client = DeployClient::builder()
///     .base_url("http://localhost:3000".to_string())
///     .api_token(SecretString::new("token".to_string().into()))
///     .build()?;
/// ```
pub struct DeployClientBuilder {
    base_url: Option<String>,
    api_token: Option<SecretString>,
    timeout: Duration,
    max_retries: usize,
}

impl Default for DeployClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl DeployClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL. Trailing slashes are removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Bearer token sent with every request.
    pub fn api_token(mut self, token: SecretString) -> Self {
        self.api_token = Some(token);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retries after the first attempt for 429/502/503/504 responses.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Pre-populate the builder from a loaded [`Config`].
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = Some(config.connection.base_url.clone());
        self.api_token = config.api_token.clone();
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self
    }

    /// `"http://host:3000//"` -> `"http://host:3000"`
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`DeployClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided or is blank.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<DeployClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);
        if base_url.is_empty() {
            return Err(ClientError::InvalidUrl("base_url is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .build()?;

        Ok(DeployClient {
            http,
            base_url,
            api_token: self.api_token,
            max_retries: self.max_retries,
        })
    }
}
