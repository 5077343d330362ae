//! Application layer: use cases over the ports.

pub mod student;
