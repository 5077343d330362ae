//! HTML front end for the student records.
//!
//! ```text
//! GET  /                              -> 303 /Students
//! GET  /Students[/Index]?sortOrder=   list
//! GET  /Students/Details/{id}         details with enrollments
//! GET  /Students/Create               form
//! POST /Students/Create               insert
//! GET  /Students/Edit/{id}            form
//! POST /Students/Edit/{id}            update
//! GET  /Students/Delete/{id}          confirmation
//! POST /Students/Delete/{id}          delete
//! ```

pub mod antiforgery;
pub mod error;
pub mod handler;
pub mod server;
pub mod view;

pub use error::HttpError;
pub use handler::AppState;
pub use server::{router, serve, shutdown_signal};
