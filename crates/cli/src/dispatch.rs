//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to command handlers.
//! - Pass global output options and the cancellation token along.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()` and `config_context`).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;
use crate::config_context::ConfigCommandContext;

pub(crate) async fn run_command(
    cli: Cli,
    config: ConfigCommandContext,
    cancel_token: &CancellationToken,
) -> Result<()> {
    match cli.command {
        Commands::Env { command } => {
            let output = commands::env::OutputOptions {
                format: &cli.output,
                file: cli.output_file,
            };
            commands::env::run(config, command, output, cancel_token).await?;
        }
    }

    Ok(())
}
