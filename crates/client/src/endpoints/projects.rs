//! Project settings and environment endpoints.
//!
//! - `GET    /projects/{id}/settings`
//! - `POST   /projects/{id}/settings`
//! - `POST   /projects/{id}/env`
//! - `DELETE /projects/{id}/env/{key}`

use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::endpoints::encode_path_segment;
use crate::endpoints::request::{read_json, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::models::{EnvTarget, EnvVariableRequest, ProjectSettings};

fn with_auth(builder: RequestBuilder, token: Option<&SecretString>) -> RequestBuilder {
    match token {
        Some(token) => builder.bearer_auth(token.expose_secret()),
        None => builder,
    }
}

fn project_url(base_url: &str, project_id: &str) -> Result<String> {
    if project_id.trim().is_empty() {
        return Err(ClientError::InvalidRequest(
            "project id must not be empty".to_string(),
        ));
    }
    Ok(format!(
        "{}/projects/{}",
        base_url,
        encode_path_segment(project_id)
    ))
}

/// Fetch the build settings and environment of a project.
pub async fn get_settings(
    client: &Client,
    base_url: &str,
    token: Option<&SecretString>,
    project_id: &str,
    max_retries: usize,
) -> Result<ProjectSettings> {
    let url = format!("{}/settings", project_url(base_url, project_id)?);
    debug!(project_id, "Fetching project settings");

    let builder = with_auth(client.get(&url), token);
    let response = send_request_with_retry(builder, max_retries).await?;
    read_json(response).await
}

/// Replace the settings of a project, environment included.
pub async fn update_settings(
    client: &Client,
    base_url: &str,
    token: Option<&SecretString>,
    project_id: &str,
    settings: &ProjectSettings,
    max_retries: usize,
) -> Result<()> {
    let url = format!("{}/settings", project_url(base_url, project_id)?);
    debug!(
        project_id,
        env_count = settings.env_variables.len(),
        "Updating project settings"
    );

    let builder = with_auth(client.post(&url), token).json(settings);
    send_request_with_retry(builder, max_retries).await?;
    Ok(())
}

/// Add or overwrite a single env variable.
#[allow(clippy::too_many_arguments)]
pub async fn add_env_variable(
    client: &Client,
    base_url: &str,
    token: Option<&SecretString>,
    project_id: &str,
    key: &str,
    value: &str,
    target: EnvTarget,
    max_retries: usize,
) -> Result<()> {
    if key.trim().is_empty() {
        return Err(ClientError::InvalidRequest(
            "env key must not be empty".to_string(),
        ));
    }
    let url = format!("{}/env", project_url(base_url, project_id)?);
    debug!(project_id, key, %target, "Adding env variable");

    let body = EnvVariableRequest { key, value, target };
    let builder = with_auth(client.post(&url), token).json(&body);
    send_request_with_retry(builder, max_retries).await?;
    Ok(())
}

/// Remove an env variable by key.
pub async fn delete_env_variable(
    client: &Client,
    base_url: &str,
    token: Option<&SecretString>,
    project_id: &str,
    key: &str,
    max_retries: usize,
) -> Result<()> {
    if key.is_empty() {
        return Err(ClientError::InvalidRequest(
            "env key must not be empty".to_string(),
        ));
    }
    let url = format!(
        "{}/env/{}",
        project_url(base_url, project_id)?,
        encode_path_segment(key)
    );
    debug!(project_id, key, "Deleting env variable");

    let builder = with_auth(client.delete(&url), token);
    send_request_with_retry(builder, max_retries).await?;
    Ok(())
}
