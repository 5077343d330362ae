//! Command-line interface definitions.
//!
//! Defines the CLI structure for the registrar application using `clap`:
//! serving the web front end, seeding the database and inspecting the
//! configuration.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// University records web application
#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the web application
    Run(RunArgs),

    /// Seed an empty database with sample students and courses
    Seed,

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `registrar config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults and overrides applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Skip seeding even if enabled in the configuration
    #[arg(long)]
    pub no_seed: bool,

    /// Override the listening port
    #[arg(long)]
    pub port: Option<u16>,
}
