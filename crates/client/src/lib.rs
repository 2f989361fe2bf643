//! REST client for the deployment dashboard's project API.
//!
//! Responsibilities:
//! - Read and replace project settings, including the env-variable map.
//! - Add and delete individual env variables.
//! - Retry rate-limited and transiently unavailable requests.
//!
//! Does NOT handle:
//! - Parsing env files or merging entries (see `deploydash-config`).
//! - Presentation or exit codes (see the cli crate).

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;

pub use client::{DeployClient, DeployClientBuilder};
pub use error::{ClientError, Result};
pub use models::{DEFAULT_PROJECT_PORT, DbType, EnvTarget, EnvVariableRequest, ProjectSettings};
