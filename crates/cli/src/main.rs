//! deploydash - command-line access to the deployment dashboard.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Build the connection config and the project API client.
//! - Map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Env-file parsing or merging (see `deploydash-config`).
//! - REST API implementation (see `deploydash-client`).
//!
//! Invariants:
//! - `load_dotenv()` runs BEFORE CLI parsing so `.env` can provide clap env defaults.
//! - Logs go to stderr; stdout carries only command output.
//! - Offline commands never require valid connection settings.

mod args;
mod cancellation;
mod commands;
mod config_context;
mod dispatch;
mod editor;
mod error;
mod formatters;
mod interactive;

use args::Cli;
use cancellation::{CancellationToken, is_cancelled_error, print_cancelled_message};
use clap::Parser;
use config_context::ConfigCommandContext;
use deploydash_config::{Config, ConfigLoader};
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    // Load .env before parsing so clap env defaults can read its values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_context = if cli.command.needs_api() {
        match build_config(&cli) {
            Ok(config) => ConfigCommandContext::Real(Box::new(config)),
            Err(e) => {
                eprintln!("Failed to build configuration: {:#}", e);
                std::process::exit(ExitCode::GeneralError.as_i32());
            }
        }
    } else {
        ConfigCommandContext::Offline
    };

    let cancel = CancellationToken::new();
    let cancel_clone = cancel.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        cancel_clone.cancel();
    });

    let exit_code = match run_command(cli, config_context, &cancel).await {
        Ok(()) => ExitCode::Success,
        Err(e) if is_cancelled_error(&e) => {
            print_cancelled_message();
            ExitCode::Interrupted
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Environment first, then CLI flags. Blank flag values fall back to the environment.
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut loader = ConfigLoader::new().from_env()?;

    if let Some(url) = non_blank(&cli.api_url) {
        loader = loader.with_base_url(url);
    }
    if let Some(token) = non_blank(&cli.api_token) {
        loader = loader.with_api_token(token);
    }
    if let Some(timeout_secs) = cli.timeout {
        loader = loader.with_timeout(std::time::Duration::from_secs(timeout_secs));
    }
    if let Some(retries) = cli.max_retries {
        loader = loader.with_max_retries(retries);
    }

    let config = loader.build()?;
    tracing::debug!(
        base_url = %config.connection.base_url,
        has_token = config.api_token.is_some(),
        "Configuration loaded"
    );
    Ok(config)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
