//! Reminder addressing.
//!
//! A reminder can live on an application, on one of its sub-tasks, or on a
//! study task. Derived study tasks resolve to their source record.

use crate::model::application::{ApplicationId, SubTaskId};
use crate::model::study_task::{StudyTaskId, StudyTaskIdError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static LEGACY_SUB_TASK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)-(\d+)$").expect("valid legacy sub-task regex"));
static LEGACY_APPLICATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+$").expect("valid legacy application regex"));

/// Record a reminder mutation addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReminderTarget {
    Application(ApplicationId),
    ApplicationTask(ApplicationId, SubTaskId),
    StudyTask(StudyTaskId),
}

impl ReminderTarget {
    /// Maps the string-plus-flag addressing used by older UI callers.
    ///
    /// With `is_application`, `"{appId}"` addresses an application and
    /// `"{appId}-{subTaskId}"` one of its sub-tasks. Otherwise `id` is a study
    /// task id.
    pub fn from_legacy(id: &str, is_application: bool) -> Result<Self, ReminderTargetError> {
        let id = id.trim();
        if !is_application {
            return Ok(Self::StudyTask(id.parse()?));
        }
        if LEGACY_APPLICATION_RE.is_match(id) {
            let application_id = parse_number(id, id)?;
            return Ok(Self::Application(ApplicationId(application_id)));
        }
        if let Some(captures) = LEGACY_SUB_TASK_RE.captures(id) {
            let application_id = parse_number(id, &captures[1])?;
            let sub_task_id = parse_number(id, &captures[2])?;
            return Ok(Self::ApplicationTask(
                ApplicationId(application_id),
                SubTaskId(sub_task_id),
            ));
        }
        Err(ReminderTargetError::Malformed(id.to_string()))
    }

    /// Application whose derived tasks must be re-synced after a mutation.
    pub fn application_id(&self) -> Option<ApplicationId> {
        match self {
            Self::Application(id) | Self::ApplicationTask(id, _) => Some(*id),
            Self::StudyTask(id) => id.application_id(),
        }
    }
}

impl Display for ReminderTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Application(id) => write!(f, "application:{id}"),
            Self::ApplicationTask(id, sub) => write!(f, "application_task:{id}-{sub}"),
            Self::StudyTask(id) => write!(f, "study_task:{id}"),
        }
    }
}

fn parse_number(raw: &str, digits: &str) -> Result<u32, ReminderTargetError> {
    digits
        .parse()
        .map_err(|_| ReminderTargetError::Malformed(raw.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderTargetError {
    Malformed(String),
    StudyTaskId(StudyTaskIdError),
}

impl Display for ReminderTargetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "malformed application reminder id `{value}`"),
            Self::StudyTaskId(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReminderTargetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StudyTaskId(err) => Some(err),
            Self::Malformed(_) => None,
        }
    }
}

impl From<StudyTaskIdError> for ReminderTargetError {
    fn from(value: StudyTaskIdError) -> Self {
        Self::StudyTaskId(value)
    }
}
