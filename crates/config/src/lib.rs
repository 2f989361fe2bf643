//! Configuration and env-file ingestion for deploydash.
//!
//! This crate provides the environment-variable ingestion engine (parse an
//! uploaded dotenv/properties file, merge it into existing entries) and the
//! loader for deploydash's own connection settings.

pub mod constants;
pub mod envfile;
mod loader;
pub mod types;

pub use envfile::{
    Entry, EnvFileError, EnvMap, MergeStats, OrderedEntries, ParseMode, ParseReport,
    merge_entries, parse_env_text, parse_env_text_strict,
};
pub use loader::{ConfigError, ConfigLoader, env_var_or_none};
pub use types::{Config, ConnectionConfig};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
