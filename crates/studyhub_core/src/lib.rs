//! Core domain logic for StudyHub.
//! This crate owns application/study-task synchronization and alert derivation.

pub mod config;
pub mod logging;
pub mod model;
pub mod notify;
mod seed;
pub mod service;
pub mod sync;

pub use config::{ConfigError, CoreConfig, LoggingConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::application::{
    Application, ApplicationId, ApplicationPatch, ApplicationStatus, ApplicationTask,
    ApplicationValidationError, SubTaskId,
};
pub use model::reminder::{ReminderTarget, ReminderTargetError};
pub use model::study_task::{
    SourceRef, StudyTask, StudyTaskDraft, StudyTaskId, StudyTaskIdError, StudyTaskPatch,
    StudyTaskValidationError, TaskPriority, TaskSource, APPLICATIONS_SUBJECT,
};
pub use notify::alert::{Alert, AlertIcon, AlertKind};
pub use notify::deriver::derive_alerts;
pub use notify::policy::{AlertPolicy, AlertPolicyError};
pub use service::app_data_service::{AppDataStore, StoreError, StoreResult, StoreSnapshot};
pub use service::planner_service::PlannerSummary;
pub use service::reminder_service::ReminderChange;
pub use sync::projection::{project_application, remove_derived_tasks, sync_application_to_study};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
