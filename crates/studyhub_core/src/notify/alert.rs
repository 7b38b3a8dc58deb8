//! Alert record shown in the header notification list.

use crate::model::study_task::TaskPriority;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Overdue,
    DueSoon,
    Reminder,
    ApplicationDeadline,
}

/// Icon hint for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertIcon {
    AlertTriangle,
    Clock,
    Bell,
    GraduationCap,
    ClipboardList,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Stable per source record and rule; usable as a UI list key.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
    pub date: NaiveDateTime,
    pub priority: TaskPriority,
    pub icon: AlertIcon,
}
