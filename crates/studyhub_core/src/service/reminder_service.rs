//! Reminder mutators on `AppDataStore`.
//!
//! # Responsibility
//! - Set, clear and toggle reminders on applications, sub-tasks and tasks.
//! - Write derived-task reminder edits back to their source record.
//!
//! # Invariants
//! - A derived task's reminder fields always equal its source's after any
//!   mutation, because the source is edited and the application re-synced.
//! - Unknown targets leave the store unchanged.

use crate::model::reminder::ReminderTarget;
use crate::model::study_task::StudyTaskId;
use crate::service::app_data_service::{AppDataStore, StoreError, StoreResult};
use chrono::NaiveDateTime;
use log::info;

/// One reminder edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderChange {
    Set(NaiveDateTime),
    Unset,
    /// Flips the flag and keeps the stored date.
    Toggle,
}

impl ReminderChange {
    fn apply(self, reminder: &mut bool, reminder_date: &mut Option<NaiveDateTime>) {
        match self {
            Self::Set(at) => {
                *reminder = true;
                *reminder_date = Some(at);
            }
            Self::Unset => {
                *reminder = false;
                *reminder_date = None;
            }
            Self::Toggle => *reminder = !*reminder,
        }
    }

    fn action(self) -> &'static str {
        match self {
            Self::Set(_) => "set",
            Self::Unset => "unset",
            Self::Toggle => "toggle",
        }
    }
}

impl AppDataStore {
    /// Enables a reminder at `at` on the target.
    pub fn set_reminder(&mut self, target: &ReminderTarget, at: NaiveDateTime) -> StoreResult<()> {
        self.change_reminder(target, ReminderChange::Set(at))
    }

    /// Disables the target's reminder and clears its time.
    pub fn unset_reminder(&mut self, target: &ReminderTarget) -> StoreResult<()> {
        self.change_reminder(target, ReminderChange::Unset)
    }

    /// Flips the target's reminder flag without touching its time.
    pub fn toggle_task_reminder(&mut self, target: &ReminderTarget) -> StoreResult<()> {
        self.change_reminder(target, ReminderChange::Toggle)
    }

    /// Applies `change` to the record `target` resolves to.
    pub fn change_reminder(
        &mut self,
        target: &ReminderTarget,
        change: ReminderChange,
    ) -> StoreResult<()> {
        let resolved = self.resolve_target(target)?;
        match &resolved {
            ReminderTarget::Application(id) => {
                let application = self.application_mut(*id)?;
                change.apply(&mut application.reminder, &mut application.reminder_date);
                self.resync_application(*id)?;
            }
            ReminderTarget::ApplicationTask(id, sub_task_id) => {
                let application = self.application_mut(*id)?;
                let sub_task =
                    application
                        .task_mut(*sub_task_id)
                        .ok_or(StoreError::SubTaskNotFound {
                            application_id: *id,
                            sub_task_id: *sub_task_id,
                        })?;
                change.apply(&mut sub_task.reminder, &mut sub_task.reminder_date);
                self.resync_application(*id)?;
            }
            ReminderTarget::StudyTask(id) => {
                let task = self.authored_task_mut(id)?;
                change.apply(&mut task.reminder, &mut task.reminder_date);
            }
        }
        info!(
            "event=reminder_changed module=store action={} target={} resolved={}",
            change.action(),
            target,
            resolved
        );
        Ok(())
    }

    /// Maps derived study task targets onto their source record.
    fn resolve_target(&self, target: &ReminderTarget) -> StoreResult<ReminderTarget> {
        let ReminderTarget::StudyTask(task_id) = target else {
            return Ok(target.clone());
        };
        if self.study_task(task_id).is_none() {
            return Err(StoreError::StudyTaskNotFound(task_id.clone()));
        }
        Ok(match task_id {
            StudyTaskId::Authored(_) => target.clone(),
            StudyTaskId::Deadline(application_id) => ReminderTarget::Application(*application_id),
            StudyTaskId::SubTask(application_id, sub_task_id) => {
                ReminderTarget::ApplicationTask(*application_id, *sub_task_id)
            }
        })
    }
}
