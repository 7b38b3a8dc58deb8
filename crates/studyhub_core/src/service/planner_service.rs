//! Study planner and dashboard views over `AppDataStore`.

use crate::model::application::ApplicationStatus;
use crate::model::study_task::{StudyTask, StudyTaskId};
use crate::service::app_data_service::{AppDataStore, StoreError, StoreResult};
use chrono::{Days, NaiveDate};
use log::debug;
use std::collections::BTreeMap;

/// Aggregate numbers for the planner header.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Sum of `estimated_hours` over incomplete tasks.
    pub pending_hours: f32,
    pub tasks_by_subject: BTreeMap<String, usize>,
}

impl PlannerSummary {
    /// Completed share in `[0.0, 1.0]`; zero for an empty planner.
    pub fn completion_ratio(&self) -> f32 {
        if self.total_tasks == 0 {
            0.0
        } else {
            self.completed_tasks as f32 / self.total_tasks as f32
        }
    }
}

impl AppDataStore {
    /// Tasks scheduled on `date`, highest priority first, then by title.
    pub fn tasks_on(&self, date: NaiveDate) -> Vec<&StudyTask> {
        let mut tasks: Vec<_> = self
            .study_tasks
            .iter()
            .filter(|task| task.date == date)
            .collect();
        tasks.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| a.task.cmp(&b.task))
        });
        tasks
    }

    /// Incomplete tasks dated within `[today, today + days]`.
    ///
    /// Sorted by date, then priority descending.
    pub fn upcoming_tasks(&self, today: NaiveDate, days: u64) -> Vec<&StudyTask> {
        let last = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
        let mut tasks: Vec<_> = self
            .study_tasks
            .iter()
            .filter(|task| !task.completed && task.date >= today && task.date <= last)
            .collect();
        tasks.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| b.priority.cmp(&a.priority)));
        tasks
    }

    pub fn planner_summary(&self) -> PlannerSummary {
        let mut tasks_by_subject = BTreeMap::new();
        let mut completed_tasks = 0;
        let mut pending_hours = 0.0;
        for task in &self.study_tasks {
            *tasks_by_subject.entry(task.subject.clone()).or_insert(0) += 1;
            if task.completed {
                completed_tasks += 1;
            } else {
                pending_hours += task.estimated_hours;
            }
        }
        PlannerSummary {
            total_tasks: self.study_tasks.len(),
            completed_tasks,
            pending_hours,
            tasks_by_subject,
        }
    }

    /// Application count per status, in pipeline order, zero counts included.
    pub fn application_status_counts(&self) -> Vec<(ApplicationStatus, usize)> {
        ApplicationStatus::ALL
            .into_iter()
            .map(|status| {
                let count = self
                    .applications
                    .iter()
                    .filter(|app| app.status == status)
                    .count();
                (status, count)
            })
            .collect()
    }

    /// Flips completion and returns the new state.
    ///
    /// Sub-task tasks write back to the application checklist. Deadline
    /// tasks are rejected: their completion follows application status.
    pub fn toggle_task_completed(&mut self, id: &StudyTaskId) -> StoreResult<bool> {
        if self.study_task(id).is_none() {
            return Err(StoreError::StudyTaskNotFound(id.clone()));
        }
        let completed = match id {
            StudyTaskId::Authored(_) => {
                let task = self.authored_task_mut(id)?;
                task.completed = !task.completed;
                task.completed
            }
            StudyTaskId::Deadline(_) => return Err(StoreError::DerivedTaskReadOnly(id.clone())),
            StudyTaskId::SubTask(application_id, sub_task_id) => {
                let application = self.application_mut(*application_id)?;
                let sub_task =
                    application
                        .task_mut(*sub_task_id)
                        .ok_or(StoreError::SubTaskNotFound {
                            application_id: *application_id,
                            sub_task_id: *sub_task_id,
                        })?;
                sub_task.completed = !sub_task.completed;
                let completed = sub_task.completed;
                self.resync_application(*application_id)?;
                completed
            }
        };
        debug!("event=task_completion_toggled module=store task_id={id} completed={completed}");
        Ok(completed)
    }
}
