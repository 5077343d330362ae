//! Registrar - university student records over HTTP.
//!
//! A small web application for creating, listing, editing and deleting
//! students, with each student's enrollments and courses shown on the
//! details page. Data lives in SQLite.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Students, enrollments, courses, sort orders and form validation
//! - [`port`] - The [`StudentStore`](port::StudentStore) trait the application depends on
//! - [`application`] - [`StudentRecords`](application::student::StudentRecords), the
//!   list/details/create/edit/delete use cases
//! - [`adapter`] - HTTP and CLI front ends, and the Diesel/SQLite store
//! - [`infrastructure`] - Configuration, logging and startup wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - In-memory store with fault injection, plus fixtures
//!
//! # Example
//!
//! ```no_run
//! use registrar::infrastructure::bootstrap::{build_student_records, open_database};
//! use registrar::infrastructure::config::settings::Config;
//!
//! # async fn example() -> registrar::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let records = build_student_records(open_database(&config)?);
//! let list = records.list(Some("name_desc")).await?;
//! println!("{} students", list.students.len());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
