//! SQLite persistence adapter.
//!
//! - [`database`] - Pool, migrations, schema and row types.
//! - [`store`] - [`SqliteStudentStore`], the [`StudentStore`](crate::port::StudentStore)
//!   implementation.
//! - [`seed`] - Sample data for a fresh database.

pub mod database;
pub mod seed;
pub mod store;

pub use database::connection::{create_pool, run_migrations, DbPool};
pub use seed::{seed_if_empty, SeedOutcome};
pub use store::SqliteStudentStore;
