//! Database configuration.

use serde::{Deserialize, Serialize};

/// SQLite connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Populate an empty database with sample data at startup.
    pub seed_on_startup: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "registrar.db".into(),
            max_connections: 5,
            seed_on_startup: true,
        }
    }
}
