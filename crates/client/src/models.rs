//! Data models for the project API.
//!
//! Responsibilities:
//! - Mirror the JSON shapes of project settings and env-variable requests.
//! - Supply the defaults the dashboard applies when fields are missing.
//!
//! Invariants:
//! - Field names are camelCase on the wire.
//! - `env_variables` keeps the order the server sent.

use deploydash_config::EnvMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Port assigned to a project when the API does not report one.
pub const DEFAULT_PROJECT_PORT: u16 = 30001;

/// Database provisioned for a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    #[default]
    None,
    Postgresql,
}

/// Build settings and environment of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
    #[serde(default = "default_port", deserialize_with = "port_or_default")]
    pub port: u16,
    #[serde(default, deserialize_with = "null_as_default")]
    pub db_type: DbType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub use_redis: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub use_elasticsearch: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub env_variables: EnvMap,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            install_command: None,
            output_dir: None,
            port: DEFAULT_PROJECT_PORT,
            db_type: DbType::None,
            use_redis: false,
            use_elasticsearch: false,
            env_variables: EnvMap::new(),
        }
    }
}

impl ProjectSettings {
    /// Copy of these settings with the environment replaced.
    pub fn with_env_variables(&self, env_variables: EnvMap) -> Self {
        Self {
            env_variables,
            ..self.clone()
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PROJECT_PORT
}

/// A zero or missing port falls back to the default, as the dashboard does.
fn port_or_default<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let port = Option::<u16>::deserialize(deserializer)?;
    Ok(port.filter(|p| *p != 0).unwrap_or(DEFAULT_PROJECT_PORT))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deployment environment an env variable applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvTarget {
    #[default]
    All,
    Production,
    Preview,
    Development,
}

impl fmt::Display for EnvTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::All => "all",
            Self::Production => "production",
            Self::Preview => "preview",
            Self::Development => "development",
        };
        f.write_str(name)
    }
}

impl FromStr for EnvTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "production" | "prod" => Ok(Self::Production),
            "preview" => Ok(Self::Preview),
            "development" | "dev" => Ok(Self::Development),
            other => Err(format!(
                "unknown target '{other}' (expected all, production, preview or development)"
            )),
        }
    }
}

/// Body of `POST /projects/{id}/env`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvVariableRequest<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub target: EnvTarget,
}

/// Error body returned by the API; `message` is a string or a list of strings.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: ApiErrorMessage,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ApiErrorMessage {
    pub(crate) fn into_text(self) -> String {
        match self {
            Self::One(message) => message,
            Self::Many(messages) => messages.join("; "),
        }
    }
}
