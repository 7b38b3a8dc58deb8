//! Core use-case services.
//!
//! # Responsibility
//! - Expose the session store and its mutators to UI callers.
//! - Keep synchronization and reminder write-back behind store methods.

pub mod app_data_service;
pub mod planner_service;
pub mod reminder_service;
