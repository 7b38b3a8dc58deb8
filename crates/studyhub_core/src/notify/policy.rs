//! Alert windows and priority thresholds.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Tunable windows for `derive_alerts`.
///
/// Day values are whole calendar days from today; minute values are offsets
/// from `now`. Defaults match the planner's built-in behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertPolicy {
    /// Study tasks due within this many days raise `due_soon`.
    pub due_soon_days: i64,
    /// How long after its time a reminder keeps firing.
    pub reminder_lookback_minutes: i64,
    /// How early before its time a reminder starts firing.
    pub reminder_lookahead_minutes: i64,
    pub application_deadline_days: i64,
    pub application_deadline_high_days: i64,
    pub application_deadline_medium_days: i64,
    pub sub_task_due_days: i64,
    pub sub_task_high_days: i64,
    pub sub_task_medium_days: i64,
    /// Suppress deadline alerts for submitted/accepted/rejected applications.
    pub skip_terminal_applications: bool,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            due_soon_days: 3,
            reminder_lookback_minutes: 60,
            reminder_lookahead_minutes: 24 * 60,
            application_deadline_days: 30,
            application_deadline_high_days: 7,
            application_deadline_medium_days: 14,
            sub_task_due_days: 14,
            sub_task_high_days: 3,
            sub_task_medium_days: 7,
            skip_terminal_applications: false,
        }
    }
}

impl AlertPolicy {
    /// Checks windows are non-negative and thresholds are ordered.
    pub fn validate(&self) -> Result<(), AlertPolicyError> {
        let windows = [
            ("due_soon_days", self.due_soon_days),
            ("reminder_lookback_minutes", self.reminder_lookback_minutes),
            ("reminder_lookahead_minutes", self.reminder_lookahead_minutes),
            ("application_deadline_days", self.application_deadline_days),
            (
                "application_deadline_high_days",
                self.application_deadline_high_days,
            ),
            (
                "application_deadline_medium_days",
                self.application_deadline_medium_days,
            ),
            ("sub_task_due_days", self.sub_task_due_days),
            ("sub_task_high_days", self.sub_task_high_days),
            ("sub_task_medium_days", self.sub_task_medium_days),
        ];
        if let Some((field, value)) = windows.into_iter().find(|(_, value)| *value < 0) {
            return Err(AlertPolicyError::Negative { field, value });
        }
        if self.application_deadline_high_days > self.application_deadline_medium_days {
            return Err(AlertPolicyError::Unordered("application_deadline"));
        }
        if self.sub_task_high_days > self.sub_task_medium_days {
            return Err(AlertPolicyError::Unordered("sub_task"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertPolicyError {
    Negative { field: &'static str, value: i64 },
    /// `*_high_days` exceeds `*_medium_days` for the named rule.
    Unordered(&'static str),
}

impl Display for AlertPolicyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negative { field, value } => {
                write!(f, "alert window `{field}` must not be negative, got {value}")
            }
            Self::Unordered(rule) => write!(
                f,
                "alert thresholds for `{rule}`: high days must not exceed medium days"
            ),
        }
    }
}

impl Error for AlertPolicyError {}
