//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!     ┌──────────────┐        ┌───────────────────┐        ┌──────────────┐
//!     │ HTTP adapter ├───────►│  StudentRecords   ├───────►│ StudentStore │
//!     │  (inbound)   │        │   (application)   │        │  (outbound)  │
//!     └──────────────┘        └───────────────────┘        └──────┬───────┘
//!                                                                 │
//!                                                 ┌───────────────┴────────┐
//!                                                 │ SQLite / in-memory fake │
//!                                                 └────────────────────────┘
//! ```

pub mod outbound;

pub use outbound::store::StudentStore;
