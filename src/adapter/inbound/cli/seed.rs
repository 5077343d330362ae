//! Handler for the `seed` command.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::sqlite::SeedOutcome;
use crate::error::Result;
use crate::infrastructure::bootstrap::{open_database, seed_database};
use crate::infrastructure::config::settings::Config;

/// Execute `seed`. Unlike startup seeding, a failure here is an error.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    config.init_logging();

    let pool = open_database(&config)?;
    output::section("Seed");
    output::field("Database", &config.database.url);

    match seed_database(pool).await? {
        SeedOutcome::AlreadySeeded => {
            output::note("Database already has students; nothing written");
        }
        SeedOutcome::Seeded {
            students,
            courses,
            enrollments,
        } => {
            output::success("Database seeded");
            output::field("Students", students);
            output::field("Courses", courses);
            output::field("Enrollments", enrollments);
        }
    }
    Ok(())
}
