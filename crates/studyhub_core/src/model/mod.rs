//! Domain model for applications, study tasks and reminders.
//!
//! # Responsibility
//! - Define the records the store owns and the typed keys that address them.
//! - Keep derived-vs-authored origin a property of the key, not a loose field.
//!
//! # Invariants
//! - Sub-task identity is `(ApplicationId, SubTaskId)`.
//! - Dates are typed; malformed strings fail at the boundary.

pub mod application;
pub mod reminder;
pub mod study_task;
