//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::{error, info};

use crate::adapter::outbound::sqlite::{
    create_pool, run_migrations, seed_if_empty, DbPool, SeedOutcome, SqliteStudentStore,
};
use crate::application::student::StudentRecords;
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;

/// Open the configured database and bring its schema up to date.
///
/// # Errors
/// Returns an error if the pool cannot be built or a migration fails.
pub fn open_database(config: &Config) -> Result<DbPool> {
    let pool = create_pool(&config.database.url, config.database.max_connections)?;
    run_migrations(&pool)?;
    info!(database = %config.database.url, "Database ready");
    Ok(pool)
}

/// Seed the database on the blocking pool.
///
/// # Errors
/// Returns the seeding error, or [`Error::Seed`] if the task panicked.
pub async fn seed_database(pool: DbPool) -> Result<SeedOutcome> {
    tokio::task::spawn_blocking(move || seed_if_empty(&pool))
        .await
        .map_err(|e| Error::Seed(e.to_string()))?
}

/// Startup seeding: failures are logged and startup carries on.
pub async fn seed_on_startup(pool: DbPool) {
    if let Err(e) = seed_database(pool).await {
        error!(error = %e, "An error occurred while seeding the database");
    }
}

/// Wire the student handler to the SQLite store.
#[must_use]
pub fn build_student_records(pool: DbPool) -> StudentRecords {
    StudentRecords::new(Arc::new(SqliteStudentStore::new(pool)))
}
