//! Alert derivation rules.
//!
//! Each rule scans the inputs independently; one record can raise several
//! alerts (for example a reminder and a due-soon alert for the same task).

use crate::model::application::{Application, ApplicationTask};
use crate::model::study_task::{StudyTask, TaskPriority};
use crate::notify::alert::{Alert, AlertIcon, AlertKind};
use crate::notify::policy::AlertPolicy;
use crate::notify::relative_time::{describe_days, describe_minutes, pluralize};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Derives the ranked alert list for `now`.
pub fn derive_alerts(
    study_tasks: &[StudyTask],
    applications: &[Application],
    now: NaiveDateTime,
    policy: &AlertPolicy,
) -> Vec<Alert> {
    let today = now.date();
    let mut alerts = Vec::new();

    for task in study_tasks.iter().filter(|task| !task.completed) {
        alerts.extend(overdue_alert(task, today));
        alerts.extend(due_soon_alert(task, today, policy));
        alerts.extend(task_reminder_alert(task, now, policy));
    }

    for application in applications {
        alerts.extend(application_deadline_alert(application, today, policy));
        for sub_task in application.tasks.iter().filter(|sub| !sub.completed) {
            alerts.extend(sub_task_due_alert(application, sub_task, today, policy));
        }
        alerts.extend(application_reminder_alert(application, now, policy));
    }

    rank_alerts(&mut alerts);
    alerts
}

/// Sorts by priority rank desc, then date asc. Stable for equal keys.
pub fn rank_alerts(alerts: &mut [Alert]) {
    alerts.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| a.date.cmp(&b.date))
    });
}

fn start_of(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

fn overdue_alert(task: &StudyTask, today: NaiveDate) -> Option<Alert> {
    let days_overdue = days_between(task.date, today);
    if days_overdue <= 0 {
        return None;
    }
    Some(Alert {
        id: format!("overdue-{}", task.id),
        kind: AlertKind::Overdue,
        title: "Overdue Task".to_string(),
        message: format!("{} is {} overdue", task.task, pluralize(days_overdue, "day")),
        date: start_of(task.date),
        priority: TaskPriority::High,
        icon: AlertIcon::AlertTriangle,
    })
}

fn due_soon_alert(task: &StudyTask, today: NaiveDate, policy: &AlertPolicy) -> Option<Alert> {
    let days_until = days_between(today, task.date);
    if !(0..=policy.due_soon_days).contains(&days_until) {
        return None;
    }
    let priority = if days_until == 0 || task.priority == TaskPriority::High {
        TaskPriority::High
    } else {
        TaskPriority::Medium
    };
    Some(Alert {
        id: format!("due-soon-{}", task.id),
        kind: AlertKind::DueSoon,
        title: "Task Due Soon".to_string(),
        message: format!("{} is due {}", task.task, describe_days(days_until)),
        date: start_of(task.date),
        priority,
        icon: AlertIcon::Clock,
    })
}

/// Whole minutes until a reminder, floored, plus whether it has passed,
/// when it sits inside the firing window.
fn reminder_offset(
    reminder: bool,
    reminder_date: Option<NaiveDateTime>,
    now: NaiveDateTime,
    policy: &AlertPolicy,
) -> Option<(NaiveDateTime, i64, bool)> {
    if !reminder {
        return None;
    }
    let at = reminder_date?;
    let minutes = (at - now).num_seconds().div_euclid(60);
    let window =
        policy.reminder_lookback_minutes.saturating_neg()..=policy.reminder_lookahead_minutes;
    window.contains(&minutes).then_some((at, minutes, at <= now))
}

fn reminder_priority(passed: bool) -> TaskPriority {
    if passed {
        TaskPriority::High
    } else {
        TaskPriority::Medium
    }
}

fn task_reminder_alert(task: &StudyTask, now: NaiveDateTime, policy: &AlertPolicy) -> Option<Alert> {
    let (at, minutes, passed) = reminder_offset(task.reminder, task.reminder_date, now, policy)?;
    Some(Alert {
        id: format!("reminder-{}", task.id),
        kind: AlertKind::Reminder,
        title: "Task Reminder".to_string(),
        message: format!("{}: {}", task.task, describe_minutes(minutes)),
        date: at,
        priority: reminder_priority(passed),
        icon: AlertIcon::Bell,
    })
}

fn tiered_priority(days: i64, high_days: i64, medium_days: i64) -> TaskPriority {
    if days <= high_days {
        TaskPriority::High
    } else if days <= medium_days {
        TaskPriority::Medium
    } else {
        TaskPriority::Low
    }
}

fn application_deadline_alert(
    application: &Application,
    today: NaiveDate,
    policy: &AlertPolicy,
) -> Option<Alert> {
    if policy.skip_terminal_applications && application.status.is_terminal() {
        return None;
    }
    let days_until = days_between(today, application.deadline);
    if !(0..=policy.application_deadline_days).contains(&days_until) {
        return None;
    }
    Some(Alert {
        id: format!("deadline-{}", application.id),
        kind: AlertKind::ApplicationDeadline,
        title: "Application Deadline Approaching".to_string(),
        message: format!(
            "{} - {} deadline is {}",
            application.university,
            application.program,
            describe_days(days_until)
        ),
        date: start_of(application.deadline),
        priority: tiered_priority(
            days_until,
            policy.application_deadline_high_days,
            policy.application_deadline_medium_days,
        ),
        icon: AlertIcon::GraduationCap,
    })
}

fn sub_task_due_alert(
    application: &Application,
    sub_task: &ApplicationTask,
    today: NaiveDate,
    policy: &AlertPolicy,
) -> Option<Alert> {
    let due_date = sub_task.due_date?;
    let days_until = days_between(today, due_date);
    if !(0..=policy.sub_task_due_days).contains(&days_until) {
        return None;
    }
    Some(Alert {
        id: format!("app-task-due-{}-{}", application.id, sub_task.id),
        kind: AlertKind::DueSoon,
        title: "Application Task Due".to_string(),
        message: format!(
            "{} for {} is due {}",
            sub_task.task,
            application.university,
            describe_days(days_until)
        ),
        date: start_of(due_date),
        priority: tiered_priority(
            days_until,
            policy.sub_task_high_days,
            policy.sub_task_medium_days,
        ),
        icon: AlertIcon::ClipboardList,
    })
}

fn application_reminder_alert(
    application: &Application,
    now: NaiveDateTime,
    policy: &AlertPolicy,
) -> Option<Alert> {
    let (at, minutes, passed) =
        reminder_offset(application.reminder, application.reminder_date, now, policy)?;
    Some(Alert {
        id: format!("app-reminder-{}", application.id),
        kind: AlertKind::Reminder,
        title: "Application Reminder".to_string(),
        message: format!(
            "{} - {}: {}",
            application.university,
            application.program,
            describe_minutes(minutes)
        ),
        date: at,
        priority: reminder_priority(passed),
        icon: AlertIcon::Bell,
    })
}
