//! Entry point from `main`: route a parsed command line to its handler.

use crate::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use crate::adapter::inbound::cli::{config, output, run, seed};
use crate::error::Result;

/// Dispatch a parsed command line.
pub async fn dispatch(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    match &cli.command {
        Commands::Run(args) => run::execute(&cli.config, args).await,
        Commands::Seed => seed::execute(&cli.config).await,
        Commands::Config(ConfigCommand::Show) => config::execute_show(&cli.config),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&cli.config),
    }
}
