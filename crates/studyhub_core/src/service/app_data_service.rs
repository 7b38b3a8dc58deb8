//! Application and study task store.
//!
//! # Responsibility
//! - Own the `applications` and `study_tasks` collections for one session.
//! - Re-run synchronization after every application-side mutation.
//! - Guard derived tasks against direct edits.
//!
//! # Invariants
//! - Every stored application has a complete, current derived task set.
//! - A failed mutation leaves both collections unchanged.
//! - Application ids and study task ids are unique in the store.

use crate::model::application::{
    Application, ApplicationId, ApplicationPatch, ApplicationValidationError, SubTaskId,
};
use crate::model::study_task::{
    StudyTask, StudyTaskDraft, StudyTaskId, StudyTaskPatch, StudyTaskValidationError,
};
use crate::notify::alert::Alert;
use crate::notify::deriver::derive_alerts;
use crate::notify::policy::{AlertPolicy, AlertPolicyError};
use crate::seed::{seed_applications, seed_study_tasks};
use crate::sync::projection::{remove_derived_tasks, sync_application_to_study};
use chrono::NaiveDateTime;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store mutation failure. The store is unchanged when one is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    ApplicationNotFound(ApplicationId),
    SubTaskNotFound {
        application_id: ApplicationId,
        sub_task_id: SubTaskId,
    },
    StudyTaskNotFound(StudyTaskId),
    DuplicateApplication(ApplicationId),
    DuplicateStudyTask(StudyTaskId),
    /// Derived tasks are owned by their application.
    DerivedTaskReadOnly(StudyTaskId),
    InvalidApplication(ApplicationValidationError),
    InvalidStudyTask(StudyTaskValidationError),
    InvalidPolicy(AlertPolicyError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApplicationNotFound(id) => write!(f, "application not found: {id}"),
            Self::SubTaskNotFound {
                application_id,
                sub_task_id,
            } => write!(
                f,
                "sub-task {sub_task_id} not found in application {application_id}"
            ),
            Self::StudyTaskNotFound(id) => write!(f, "study task not found: {id}"),
            Self::DuplicateApplication(id) => write!(f, "application already exists: {id}"),
            Self::DuplicateStudyTask(id) => write!(f, "study task already exists: {id}"),
            Self::DerivedTaskReadOnly(id) => write!(
                f,
                "study task {id} is derived from an application and cannot be edited directly"
            ),
            Self::InvalidApplication(err) => write!(f, "{err}"),
            Self::InvalidStudyTask(err) => write!(f, "{err}"),
            Self::InvalidPolicy(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidApplication(err) => Some(err),
            Self::InvalidStudyTask(err) => Some(err),
            Self::InvalidPolicy(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApplicationValidationError> for StoreError {
    fn from(value: ApplicationValidationError) -> Self {
        Self::InvalidApplication(value)
    }
}

impl From<StudyTaskValidationError> for StoreError {
    fn from(value: StudyTaskValidationError) -> Self {
        Self::InvalidStudyTask(value)
    }
}

impl From<AlertPolicyError> for StoreError {
    fn from(value: AlertPolicyError) -> Self {
        Self::InvalidPolicy(value)
    }
}

/// Serializable copy of store state handed to the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub applications: Vec<Application>,
    pub study_tasks: Vec<StudyTask>,
}

/// Session-scoped owner of applications and study tasks.
#[derive(Debug, Clone, Default)]
pub struct AppDataStore {
    pub(crate) applications: Vec<Application>,
    pub(crate) study_tasks: Vec<StudyTask>,
    policy: AlertPolicy,
}

impl AppDataStore {
    /// Creates an empty store with the default alert policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that derives alerts with `policy`.
    ///
    /// # Errors
    /// - `InvalidPolicy` when `policy` fails `AlertPolicy::validate`.
    pub fn with_policy(policy: AlertPolicy) -> StoreResult<Self> {
        policy.validate()?;
        Ok(Self {
            policy,
            ..Self::default()
        })
    }

    /// Creates a store loaded with the built-in fixture set.
    ///
    /// Synchronization runs once per seeded application.
    pub fn with_seed_data() -> Self {
        let mut store = Self::new();
        store.study_tasks = seed_study_tasks();
        for application in seed_applications() {
            sync_application_to_study(&mut store.study_tasks, &application);
            store.applications.push(application);
        }
        info!(
            "event=store_seeded module=store applications={} study_tasks={}",
            store.applications.len(),
            store.study_tasks.len()
        );
        store
    }

    /// Rebuilds a store from a snapshot.
    ///
    /// Derived tasks in the snapshot are discarded and re-projected from the
    /// applications; only authored tasks are taken as-is.
    ///
    /// # Errors
    /// - `InvalidPolicy`, `InvalidApplication` or `InvalidStudyTask` for
    ///   input that fails validation.
    /// - `DuplicateApplication` / `DuplicateStudyTask` for repeated ids.
    pub fn from_snapshot(snapshot: StoreSnapshot, policy: AlertPolicy) -> StoreResult<Self> {
        let mut store = Self::with_policy(policy)?;
        for application in snapshot.applications {
            application.validate()?;
            if store.application(application.id).is_some() {
                return Err(StoreError::DuplicateApplication(application.id));
            }
            store.applications.push(application);
        }

        let mut seen = HashSet::new();
        let mut discarded = 0usize;
        for task in snapshot.study_tasks {
            if task.is_derived() {
                discarded += 1;
                continue;
            }
            task.validate()?;
            if !seen.insert(task.id.clone()) {
                return Err(StoreError::DuplicateStudyTask(task.id));
            }
            store.study_tasks.push(task);
        }

        for application in &store.applications {
            sync_application_to_study(&mut store.study_tasks, application);
        }
        debug!(
            "event=store_restored module=store applications={} discarded_derived={}",
            store.applications.len(),
            discarded
        );
        Ok(store)
    }

    /// Copies both collections, derived tasks included.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            applications: self.applications.clone(),
            study_tasks: self.study_tasks.clone(),
        }
    }

    /// Applications in insertion order.
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    /// Authored and derived study tasks.
    pub fn study_tasks(&self) -> &[StudyTask] {
        &self.study_tasks
    }

    pub fn application(&self, id: ApplicationId) -> Option<&Application> {
        self.applications.iter().find(|app| app.id == id)
    }

    pub fn study_task(&self, id: &StudyTaskId) -> Option<&StudyTask> {
        self.study_tasks.iter().find(|task| &task.id == id)
    }

    /// Policy `alerts` derives with.
    pub fn policy(&self) -> &AlertPolicy {
        &self.policy
    }

    /// Replaces the alert policy used by `alerts`.
    ///
    /// # Errors
    /// - `InvalidPolicy` when `policy` fails validation; the current policy
    ///   is kept.
    pub fn set_policy(&mut self, policy: AlertPolicy) -> StoreResult<()> {
        policy.validate()?;
        debug!("event=policy_replaced module=store");
        self.policy = policy;
        Ok(())
    }

    /// Derives the current alert list with the store's policy.
    pub fn alerts(&self, now: NaiveDateTime) -> Vec<Alert> {
        derive_alerts(&self.study_tasks, &self.applications, now, &self.policy)
    }

    /// Adds an application and projects its derived tasks.
    ///
    /// # Errors
    /// - `InvalidApplication` or `DuplicateApplication`.
    pub fn add_application(&mut self, application: Application) -> StoreResult<()> {
        application.validate()?;
        if self.application(application.id).is_some() {
            return Err(StoreError::DuplicateApplication(application.id));
        }
        let id = application.id;
        sync_application_to_study(&mut self.study_tasks, &application);
        self.applications.push(application);
        info!("event=application_added module=store application_id={id}");
        Ok(())
    }

    /// Merges `patch` into an application, then re-syncs it.
    ///
    /// # Errors
    /// - `ApplicationNotFound` for an unknown id.
    /// - `InvalidApplication` when the merged application fails validation.
    pub fn update_application(
        &mut self,
        id: ApplicationId,
        patch: ApplicationPatch,
    ) -> StoreResult<()> {
        let application = self.application_mut(id)?;
        let mut updated = application.clone();
        updated.apply_patch(patch);
        updated.validate()?;
        *application = updated;
        self.resync_application(id)?;
        info!("event=application_updated module=store application_id={id}");
        Ok(())
    }

    /// Removes an application and every task derived from it.
    ///
    /// # Errors
    /// - `ApplicationNotFound` for an unknown id.
    pub fn delete_application(&mut self, id: ApplicationId) -> StoreResult<Application> {
        let index = self
            .applications
            .iter()
            .position(|app| app.id == id)
            .ok_or(StoreError::ApplicationNotFound(id))?;
        let removed = self.applications.remove(index);
        let cascaded = remove_derived_tasks(&mut self.study_tasks, id);
        info!(
            "event=application_deleted module=store application_id={id} cascaded_tasks={cascaded}"
        );
        Ok(removed)
    }

    /// Re-runs synchronization for one application.
    ///
    /// Derived tasks of `id` are replaced by a fresh projection; authored
    /// tasks are untouched.
    ///
    /// # Errors
    /// - `ApplicationNotFound` for an unknown id.
    pub fn resync_application(&mut self, id: ApplicationId) -> StoreResult<()> {
        let application = self
            .applications
            .iter()
            .find(|app| app.id == id)
            .ok_or(StoreError::ApplicationNotFound(id))?;
        sync_application_to_study(&mut self.study_tasks, application);
        Ok(())
    }

    /// Adds an authored study task and returns its id.
    ///
    /// # Errors
    /// - `InvalidStudyTask` for a reserved or blank id or invalid fields.
    /// - `DuplicateStudyTask` when the id is taken.
    pub fn add_study_task(&mut self, draft: StudyTaskDraft) -> StoreResult<StudyTaskId> {
        let id = match draft.id {
            Some(token) => StudyTaskId::authored(token).map_err(StudyTaskValidationError::from)?,
            None => StudyTaskId::generate(),
        };
        if self.study_task(&id).is_some() {
            return Err(StoreError::DuplicateStudyTask(id));
        }
        let task = StudyTask {
            id: id.clone(),
            task: draft.task,
            subject: draft.subject,
            date: draft.date,
            completed: draft.completed,
            priority: draft.priority,
            estimated_hours: draft.estimated_hours,
            reminder: draft.reminder,
            reminder_date: draft.reminder_date,
        };
        task.validate()?;
        self.study_tasks.push(task);
        debug!("event=study_task_added module=store task_id={id}");
        Ok(id)
    }

    /// Merges `patch` into an authored study task.
    ///
    /// # Errors
    /// - `DerivedTaskReadOnly` for derived ids, `StudyTaskNotFound` for
    ///   unknown ones, `InvalidStudyTask` when the merge fails validation.
    pub fn update_study_task(&mut self, id: &StudyTaskId, patch: StudyTaskPatch) -> StoreResult<()> {
        let task = self.authored_task_mut(id)?;
        let mut updated = task.clone();
        updated.apply_patch(patch);
        updated.validate()?;
        *task = updated;
        debug!("event=study_task_updated module=store task_id={id}");
        Ok(())
    }

    /// Removes an authored study task.
    ///
    /// # Errors
    /// - `DerivedTaskReadOnly` for derived ids, `StudyTaskNotFound` for
    ///   unknown ones.
    pub fn delete_study_task(&mut self, id: &StudyTaskId) -> StoreResult<StudyTask> {
        if id.is_derived() {
            return Err(StoreError::DerivedTaskReadOnly(id.clone()));
        }
        let index = self
            .study_tasks
            .iter()
            .position(|task| &task.id == id)
            .ok_or_else(|| StoreError::StudyTaskNotFound(id.clone()))?;
        debug!("event=study_task_deleted module=store task_id={id}");
        Ok(self.study_tasks.remove(index))
    }

    pub(crate) fn application_mut(&mut self, id: ApplicationId) -> StoreResult<&mut Application> {
        self.applications
            .iter_mut()
            .find(|app| app.id == id)
            .ok_or(StoreError::ApplicationNotFound(id))
    }

    pub(crate) fn authored_task_mut(&mut self, id: &StudyTaskId) -> StoreResult<&mut StudyTask> {
        if id.is_derived() {
            return Err(StoreError::DerivedTaskReadOnly(id.clone()));
        }
        self.study_tasks
            .iter_mut()
            .find(|task| &task.id == id)
            .ok_or_else(|| StoreError::StudyTaskNotFound(id.clone()))
    }
}
