//! Handler for the `config` command group.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::{Config, DATABASE_URL_ENV, PORT_ENV};

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    output::section("Effective Configuration");
    output::field("Path", path.display());
    for name in [DATABASE_URL_ENV, PORT_ENV] {
        if std::env::var_os(name).is_some() {
            output::note(&format!("{name} override applied"));
        }
    }
    output::section("TOML");
    output::lines(&config.to_toml()?);
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let config = Config::load(path)?;
    output::success("Config file is valid");
    output::field("Listen", config.server.addr()?);
    output::field("Database", &config.database.url);

    if !config.database.seed_on_startup {
        output::warning("Startup seeding is disabled");
    }
    Ok(())
}
