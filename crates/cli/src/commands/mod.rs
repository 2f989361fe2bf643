//! CLI command implementations.

pub mod env;

use deploydash_client::DeployClient;
use deploydash_config::Config;

/// Build a client from the validated configuration.
pub fn build_client_from_config(config: &Config) -> anyhow::Result<DeployClient> {
    Ok(DeployClient::builder().from_config(config).build()?)
}
