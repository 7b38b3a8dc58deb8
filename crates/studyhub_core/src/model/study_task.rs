//! Study task domain model.
//!
//! # Responsibility
//! - Define the schedulable item rendered on the study calendar.
//! - Encode authored vs application-derived origin in a typed key.
//!
//! # Invariants
//! - Origin is a property of `StudyTaskId`; `source()` and `source_ref()` can
//!   never disagree with the key.
//! - Authored ids never use the reserved `app-` derived patterns.
//! - `estimated_hours` is strictly positive once validated.

use crate::model::application::{ApplicationId, SubTaskId};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Subject assigned to every application-derived task.
pub const APPLICATIONS_SUBJECT: &str = "Applications";

const DERIVED_ID_PREFIX: &str = "app-";

static DEADLINE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^app-deadline-(\d+)$").expect("valid deadline id regex"));
static SUB_TASK_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^app-task-(\d+)-(\d+)$").expect("valid sub-task id regex"));

/// Typed study task key.
///
/// Wire forms: opaque token, `app-deadline-{app}`, `app-task-{app}-{sub}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StudyTaskId {
    /// User-authored task with an opaque token.
    Authored(String),
    /// Deadline task projected from an application.
    Deadline(ApplicationId),
    /// Checklist item projected from an application sub-task.
    SubTask(ApplicationId, SubTaskId),
}

impl StudyTaskId {
    /// Generates a fresh authored id.
    pub fn generate() -> Self {
        Self::Authored(Uuid::new_v4().to_string())
    }

    /// Builds an authored id from a caller token.
    ///
    /// # Errors
    /// - `Empty` for blank tokens.
    /// - `ReservedPrefix` when the token would collide with derived ids.
    pub fn authored(token: impl Into<String>) -> Result<Self, StudyTaskIdError> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(StudyTaskIdError::Empty);
        }
        if trimmed.starts_with(DERIVED_ID_PREFIX) {
            return Err(StudyTaskIdError::ReservedPrefix(trimmed.to_string()));
        }
        Ok(Self::Authored(trimmed.to_string()))
    }

    pub fn source(&self) -> TaskSource {
        match self {
            Self::Authored(_) => TaskSource::Study,
            Self::Deadline(_) | Self::SubTask(..) => TaskSource::Application,
        }
    }

    pub fn is_derived(&self) -> bool {
        self.source() == TaskSource::Application
    }

    /// Back-reference to the owning application for derived tasks.
    pub fn source_ref(&self) -> Option<SourceRef> {
        match self {
            Self::Authored(_) => None,
            Self::Deadline(application_id) => Some(SourceRef {
                application_id: *application_id,
                sub_task_id: None,
            }),
            Self::SubTask(application_id, sub_task_id) => Some(SourceRef {
                application_id: *application_id,
                sub_task_id: Some(*sub_task_id),
            }),
        }
    }

    pub fn application_id(&self) -> Option<ApplicationId> {
        self.source_ref().map(|source| source.application_id)
    }
}

impl Display for StudyTaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authored(token) => f.write_str(token),
            Self::Deadline(application_id) => write!(f, "app-deadline-{application_id}"),
            Self::SubTask(application_id, sub_task_id) => {
                write!(f, "app-task-{application_id}-{sub_task_id}")
            }
        }
    }
}

impl FromStr for StudyTaskId {
    type Err = StudyTaskIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if let Some(captures) = DEADLINE_ID_RE.captures(value) {
            let application_id = parse_id_part(value, &captures[1])?;
            return Ok(Self::Deadline(ApplicationId(application_id)));
        }
        if let Some(captures) = SUB_TASK_ID_RE.captures(value) {
            let application_id = parse_id_part(value, &captures[1])?;
            let sub_task_id = parse_id_part(value, &captures[2])?;
            return Ok(Self::SubTask(
                ApplicationId(application_id),
                SubTaskId(sub_task_id),
            ));
        }
        Self::authored(value)
    }
}

impl Serialize for StudyTaskId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StudyTaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

fn parse_id_part(raw: &str, digits: &str) -> Result<u32, StudyTaskIdError> {
    digits
        .parse()
        .map_err(|_| StudyTaskIdError::NumberOutOfRange(raw.to_string()))
}

/// Errors produced while building or parsing a `StudyTaskId`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyTaskIdError {
    Empty,
    ReservedPrefix(String),
    NumberOutOfRange(String),
}

impl Display for StudyTaskIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "study task id must not be empty"),
            Self::ReservedPrefix(value) => write!(
                f,
                "study task id `{value}` uses the reserved `{DERIVED_ID_PREFIX}` prefix"
            ),
            Self::NumberOutOfRange(value) => {
                write!(f, "study task id `{value}` has an out-of-range number")
            }
        }
    }
}

impl Error for StudyTaskIdError {}

/// Where a study task came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSource {
    Study,
    Application,
}

/// Link from a derived task back to its source record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRef {
    pub application_id: ApplicationId,
    /// `None` addresses the application's own deadline.
    pub sub_task_id: Option<SubTaskId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

/// Schedulable study calendar item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StudyTaskWire", into = "StudyTaskWire")]
pub struct StudyTask {
    pub id: StudyTaskId,
    pub task: String,
    pub subject: String,
    /// Effective scheduling date.
    pub date: NaiveDate,
    pub completed: bool,
    pub priority: TaskPriority,
    pub estimated_hours: f32,
    pub reminder: bool,
    pub reminder_date: Option<NaiveDateTime>,
}

impl StudyTask {
    pub fn source(&self) -> TaskSource {
        self.id.source()
    }

    pub fn source_ref(&self) -> Option<SourceRef> {
        self.id.source_ref()
    }

    pub fn is_derived(&self) -> bool {
        self.id.is_derived()
    }

    /// Validates field invariants.
    pub fn validate(&self) -> Result<(), StudyTaskValidationError> {
        if self.task.trim().is_empty() {
            return Err(StudyTaskValidationError::BlankTask);
        }
        if !(self.estimated_hours > 0.0) {
            return Err(StudyTaskValidationError::NonPositiveHours(
                self.estimated_hours,
            ));
        }
        Ok(())
    }

    /// Applies a partial update in place. Absent fields are left untouched.
    pub fn apply_patch(&mut self, patch: StudyTaskPatch) {
        if let Some(task) = patch.task {
            self.task = task;
        }
        if let Some(subject) = patch.subject {
            self.subject = subject;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(estimated_hours) = patch.estimated_hours {
            self.estimated_hours = estimated_hours;
        }
        if let Some(reminder) = patch.reminder {
            self.reminder = reminder;
        }
        if let Some(reminder_date) = patch.reminder_date {
            self.reminder_date = reminder_date;
        }
    }
}

/// Input for creating an authored study task.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyTaskDraft {
    /// Caller token; a UUID is generated when absent.
    pub id: Option<String>,
    pub task: String,
    pub subject: String,
    pub date: NaiveDate,
    pub priority: TaskPriority,
    pub estimated_hours: f32,
    pub completed: bool,
    pub reminder: bool,
    pub reminder_date: Option<NaiveDateTime>,
}

impl StudyTaskDraft {
    pub fn new(
        task: impl Into<String>,
        subject: impl Into<String>,
        date: NaiveDate,
        priority: TaskPriority,
        estimated_hours: f32,
    ) -> Self {
        Self {
            id: None,
            task: task.into(),
            subject: subject.into(),
            date,
            priority,
            estimated_hours,
            completed: false,
            reminder: false,
            reminder_date: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Partial update for authored study tasks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudyTaskPatch {
    pub task: Option<String>,
    pub subject: Option<String>,
    pub date: Option<NaiveDate>,
    pub completed: Option<bool>,
    pub priority: Option<TaskPriority>,
    pub estimated_hours: Option<f32>,
    pub reminder: Option<bool>,
    pub reminder_date: Option<Option<NaiveDateTime>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StudyTaskValidationError {
    BlankTask,
    NonPositiveHours(f32),
    InvalidId(StudyTaskIdError),
    /// Wire `source`/`applicationId` contradict the id pattern.
    SourceMismatch(String),
}

impl Display for StudyTaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTask => write!(f, "study task title must not be blank"),
            Self::NonPositiveHours(hours) => {
                write!(f, "estimated hours must be positive, got {hours}")
            }
            Self::InvalidId(err) => write!(f, "{err}"),
            Self::SourceMismatch(id) => {
                write!(f, "study task `{id}` source fields contradict its id")
            }
        }
    }
}

impl Error for StudyTaskValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidId(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StudyTaskIdError> for StudyTaskValidationError {
    fn from(value: StudyTaskIdError) -> Self {
        Self::InvalidId(value)
    }
}

/// Flat external shape with explicit `source` and `applicationId`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudyTaskWire {
    id: StudyTaskId,
    task: String,
    subject: String,
    date: NaiveDate,
    #[serde(default)]
    completed: bool,
    priority: TaskPriority,
    estimated_hours: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<TaskSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    application_id: Option<ApplicationId>,
    #[serde(default)]
    reminder: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reminder_date: Option<NaiveDateTime>,
}

impl From<StudyTask> for StudyTaskWire {
    fn from(value: StudyTask) -> Self {
        Self {
            source: Some(value.id.source()),
            application_id: value.id.application_id(),
            id: value.id,
            task: value.task,
            subject: value.subject,
            date: value.date,
            completed: value.completed,
            priority: value.priority,
            estimated_hours: value.estimated_hours,
            reminder: value.reminder,
            reminder_date: value.reminder_date,
        }
    }
}

impl TryFrom<StudyTaskWire> for StudyTask {
    type Error = StudyTaskValidationError;

    fn try_from(value: StudyTaskWire) -> Result<Self, Self::Error> {
        let source_matches = value.source.map_or(true, |source| source == value.id.source());
        let application_matches = value
            .application_id
            .map_or(true, |id| Some(id) == value.id.application_id());
        if !source_matches || !application_matches {
            return Err(StudyTaskValidationError::SourceMismatch(value.id.to_string()));
        }

        let task = StudyTask {
            id: value.id,
            task: value.task,
            subject: value.subject,
            date: value.date,
            completed: value.completed,
            priority: value.priority,
            estimated_hours: value.estimated_hours,
            reminder: value.reminder,
            reminder_date: value.reminder_date,
        };
        task.validate()?;
        Ok(task)
    }
}
