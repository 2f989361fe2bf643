//! Project API client.
//!
//! [`DeployClient`] owns a pooled `reqwest::Client`, the normalized base URL,
//! the optional bearer token and the retry budget, and forwards each call to
//! the matching function in [`crate::endpoints`].
//!
//! Invariants:
//! - Methods take `&self`; the client is cheap to share across tasks.
//! - The token is never logged.

pub mod builder;

use secrecy::SecretString;

use crate::endpoints;
use crate::error::Result;
use crate::models::{EnvTarget, ProjectSettings};

pub use builder::DeployClientBuilder;

/// Client for the deployment dashboard REST API.
#[derive(Debug)]
pub struct DeployClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) api_token: Option<SecretString>,
    pub(crate) max_retries: usize,
}

impl DeployClient {
    pub fn builder() -> DeployClientBuilder {
        DeployClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_token(&self) -> bool {
        self.api_token.is_some()
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Fetch a project's settings, environment included.
    pub async fn get_settings(&self, project_id: &str) -> Result<ProjectSettings> {
        endpoints::get_settings(
            &self.http,
            &self.base_url,
            self.api_token.as_ref(),
            project_id,
            self.max_retries,
        )
        .await
    }

    /// Replace a project's settings.
    pub async fn update_settings(&self, project_id: &str, settings: &ProjectSettings) -> Result<()> {
        endpoints::update_settings(
            &self.http,
            &self.base_url,
            self.api_token.as_ref(),
            project_id,
            settings,
            self.max_retries,
        )
        .await
    }

    pub async fn add_env_variable(
        &self,
        project_id: &str,
        key: &str,
        value: &str,
        target: EnvTarget,
    ) -> Result<()> {
        endpoints::add_env_variable(
            &self.http,
            &self.base_url,
            self.api_token.as_ref(),
            project_id,
            key,
            value,
            target,
            self.max_retries,
        )
        .await
    }

    pub async fn delete_env_variable(&self, project_id: &str, key: &str) -> Result<()> {
        endpoints::delete_env_variable(
            &self.http,
            &self.base_url,
            self.api_token.as_ref(),
            project_id,
            key,
            self.max_retries,
        )
        .await
    }
}
