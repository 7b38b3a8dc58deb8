//! Application-to-study-task synchronization.
//!
//! # Responsibility
//! - Project each application into its derived study tasks.
//! - Replace stale derived entries wholesale so re-runs never accumulate.
//!
//! # Invariants
//! - After sync, an application owns exactly one deadline task and one task
//!   per sub-task.
//! - Sync never touches authored tasks or other applications' entries.

pub mod projection;
