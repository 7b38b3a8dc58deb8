//! Application domain model.
//!
//! # Responsibility
//! - Define the admission application aggregate and its sub-task checklist.
//! - Provide validation and partial-merge helpers used by the store.
//!
//! # Invariants
//! - `ApplicationTask::id` is unique within one application, not globally.
//! - `university` and `program` are never blank once validated.
//! - Terminal statuses are `submitted`, `accepted` and `rejected`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-assigned application identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u32);

impl Display for ApplicationId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sub-task identifier, unique only within its owning application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubTaskId(pub u32);

impl Display for SubTaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Admission pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApplicationStatus {
    Planning,
    InProgress,
    Submitted,
    Interview,
    Accepted,
    Rejected,
    /// Still actionable: a waitlisted candidate may need follow-up work.
    Waitlisted,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 7] = [
        Self::Planning,
        Self::InProgress,
        Self::Submitted,
        Self::Interview,
        Self::Accepted,
        Self::Rejected,
        Self::Waitlisted,
    ];

    /// Returns whether no further deadline action is needed.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Submitted | Self::Accepted | Self::Rejected)
    }

    /// Stable wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::InProgress => "in-progress",
            Self::Submitted => "submitted",
            Self::Interview => "interview",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Waitlisted => "waitlisted",
        }
    }
}

/// Checklist item nested under an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationTask {
    pub id: SubTaskId,
    pub task: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub reminder: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<NaiveDateTime>,
}

impl ApplicationTask {
    pub fn new(id: u32, task: impl Into<String>) -> Self {
        Self {
            id: SubTaskId(id),
            task: task.into(),
            completed: false,
            due_date: None,
            reminder: false,
            reminder_date: None,
        }
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Date the derived study task is scheduled on.
    ///
    /// Falls back from an active reminder to the due date, then to the
    /// owning application's deadline.
    pub fn effective_date(&self, application_deadline: NaiveDate) -> NaiveDate {
        active_reminder_day(self.reminder, self.reminder_date)
            .or(self.due_date)
            .unwrap_or(application_deadline)
    }
}

/// University/program admission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub university: String,
    pub program: String,
    #[serde(default)]
    pub country: String,
    pub deadline: NaiveDate,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub tasks: Vec<ApplicationTask>,
    #[serde(default)]
    pub reminder: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<NaiveDateTime>,
}

impl Application {
    /// Creates a `planning` application without sub-tasks or reminder.
    pub fn new(
        id: u32,
        university: impl Into<String>,
        program: impl Into<String>,
        country: impl Into<String>,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            id: ApplicationId(id),
            university: university.into(),
            program: program.into(),
            country: country.into(),
            deadline,
            status: ApplicationStatus::Planning,
            tasks: Vec::new(),
            reminder: false,
            reminder_date: None,
        }
    }

    pub fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_task(mut self, task: ApplicationTask) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn task(&self, id: SubTaskId) -> Option<&ApplicationTask> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn task_mut(&mut self, id: SubTaskId) -> Option<&mut ApplicationTask> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    /// Date the derived deadline task is scheduled on.
    pub fn effective_date(&self) -> NaiveDate {
        active_reminder_day(self.reminder, self.reminder_date).unwrap_or(self.deadline)
    }

    /// Validates business invariants.
    ///
    /// # Errors
    /// - `BlankUniversity` / `BlankProgram` for whitespace-only names.
    /// - `DuplicateSubTask` when two checklist items share an id.
    pub fn validate(&self) -> Result<(), ApplicationValidationError> {
        if self.university.trim().is_empty() {
            return Err(ApplicationValidationError::BlankUniversity(self.id));
        }
        if self.program.trim().is_empty() {
            return Err(ApplicationValidationError::BlankProgram(self.id));
        }
        let mut seen = HashSet::with_capacity(self.tasks.len());
        for task in &self.tasks {
            if !seen.insert(task.id) {
                return Err(ApplicationValidationError::DuplicateSubTask {
                    application_id: self.id,
                    sub_task_id: task.id,
                });
            }
        }
        Ok(())
    }

    /// Applies a partial update in place. Absent fields are left untouched.
    pub fn apply_patch(&mut self, patch: ApplicationPatch) {
        if let Some(university) = patch.university {
            self.university = university;
        }
        if let Some(program) = patch.program {
            self.program = program;
        }
        if let Some(country) = patch.country {
            self.country = country;
        }
        if let Some(deadline) = patch.deadline {
            self.deadline = deadline;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(tasks) = patch.tasks {
            self.tasks = tasks;
        }
        if let Some(reminder) = patch.reminder {
            self.reminder = reminder;
        }
        if let Some(reminder_date) = patch.reminder_date {
            self.reminder_date = reminder_date;
        }
    }
}

/// Partial update for `Application`.
///
/// `reminder_date: Some(None)` clears the stored reminder time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationPatch {
    pub university: Option<String>,
    pub program: Option<String>,
    pub country: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub status: Option<ApplicationStatus>,
    pub tasks: Option<Vec<ApplicationTask>>,
    pub reminder: Option<bool>,
    /// Absent keeps the stored time; an explicit `null` clears it.
    #[serde(deserialize_with = "deserialize_present")]
    pub reminder_date: Option<Option<NaiveDateTime>>,
}

/// Wraps any present value, `null` included, so it is distinct from absent.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Validation failure for application input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationValidationError {
    BlankUniversity(ApplicationId),
    BlankProgram(ApplicationId),
    DuplicateSubTask {
        application_id: ApplicationId,
        sub_task_id: SubTaskId,
    },
}

impl Display for ApplicationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankUniversity(id) => write!(f, "application {id}: university must not be blank"),
            Self::BlankProgram(id) => write!(f, "application {id}: program must not be blank"),
            Self::DuplicateSubTask {
                application_id,
                sub_task_id,
            } => write!(
                f,
                "application {application_id}: duplicate sub-task id {sub_task_id}"
            ),
        }
    }
}

impl Error for ApplicationValidationError {}

/// Day of an enabled reminder. A stored date without the flag does not count.
pub(crate) fn active_reminder_day(
    reminder: bool,
    reminder_date: Option<NaiveDateTime>,
) -> Option<NaiveDate> {
    if reminder {
        reminder_date.map(|at| at.date())
    } else {
        None
    }
}
