//! Configuration context for command execution.
//!
//! Responsibilities:
//! - Distinguish commands that talk to the API from offline ones.
//! - Hand the validated config only to commands that need it.
//!
//! Invariants:
//! - `Offline` never reaches a command that builds a client.

use deploydash_config::Config;

pub(crate) enum ConfigCommandContext {
    /// Validated config from environment and CLI flags.
    Real(Box<Config>),
    /// No connection settings were loaded (e.g. `env parse`).
    Offline,
}

impl ConfigCommandContext {
    /// Extract the real config, failing for offline commands.
    pub(crate) fn into_real_config(self) -> anyhow::Result<Config> {
        match self {
            ConfigCommandContext::Real(config) => Ok(*config),
            ConfigCommandContext::Offline => anyhow::bail!(
                "Internal error: attempted to use offline context for an API operation"
            ),
        }
    }
}
