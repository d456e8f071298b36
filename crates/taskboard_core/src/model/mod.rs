//! Domain model for tasks and the users that own them.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - The model layer never reads the clock; derived values live in `stats`.

pub mod task;
pub mod user;
