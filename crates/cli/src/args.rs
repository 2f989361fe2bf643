//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Bind global connection flags to their environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not validate connection settings (see `ConfigLoader::build`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "deploydash")]
#[command(about = "Manage deployment dashboard projects from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  deploydash env parse .env.production --reveal\n  deploydash env import my-project .env --dry-run\n  deploydash env list my-project --reveal-key DATABASE_URL\n  deploydash env set my-project API_URL https://api.example.com --target production\n  deploydash -o json env list my-project\n"
)]
pub struct Cli {
    /// Base URL of the project API (e.g., http://localhost:3000)
    #[arg(long, global = true, env = "DEPLOYDASH_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token for the project API
    #[arg(short, long, global = true, env = "DEPLOYDASH_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "DEPLOYDASH_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for rate-limited or unavailable responses
    #[arg(long, global = true, env = "DEPLOYDASH_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Output format (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    pub output: String,

    /// Output file path (saves results to file instead of stdout)
    #[arg(long, global = true, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse, import and manage project environment variables
    Env {
        #[command(subcommand)]
        command: commands::env::EnvCommand,
    },
}

impl Commands {
    /// True when the command talks to the project API.
    pub fn needs_api(&self) -> bool {
        match self {
            Commands::Env { command } => command.needs_api(),
        }
    }
}
