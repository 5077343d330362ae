//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`store`] - [`InMemoryStudentStore`](store::InMemoryStudentStore), a
//!   [`StudentStore`](crate::port::StudentStore) fake with fault injection.
//! - [`domain`] - Builders for students and form submissions.

pub mod domain;
pub mod store;

pub use store::{InMemoryStudentStore, StoreOp};
