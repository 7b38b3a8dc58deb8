//! Derived notification engine.
//!
//! # Responsibility
//! - Turn the current task/application state into a ranked alert list.
//! - Keep every threshold in `AlertPolicy` so callers can tune windows.
//!
//! # Invariants
//! - Derivation is pure: same inputs and `now` give the same output.
//! - Output is ordered by priority rank desc, then alert date asc.

pub mod alert;
pub mod deriver;
pub mod policy;
mod relative_time;
