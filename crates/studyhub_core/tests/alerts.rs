use chrono::{Duration, NaiveDate, NaiveDateTime};
use studyhub_core::{
    derive_alerts, Alert, AlertIcon, AlertKind, AlertPolicy, AppDataStore, Application,
    ApplicationStatus, ApplicationTask, StudyTask, StudyTaskId, TaskPriority,
};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 10)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

fn today_plus(days: i64) -> NaiveDate {
    now().date() + Duration::days(days)
}

fn task(token: &str, date: NaiveDate, priority: TaskPriority) -> StudyTask {
    StudyTask {
        id: StudyTaskId::authored(token).unwrap(),
        task: format!("Task {token}"),
        subject: "Math".to_string(),
        date,
        completed: false,
        priority,
        estimated_hours: 1.0,
        reminder: false,
        reminder_date: None,
    }
}

fn with_reminder(mut task: StudyTask, offset_minutes: i64) -> StudyTask {
    task.reminder = true;
    task.reminder_date = Some(now() + Duration::minutes(offset_minutes));
    task
}

fn with_reminder_seconds(mut task: StudyTask, offset_seconds: i64) -> StudyTask {
    task.reminder = true;
    task.reminder_date = Some(now() + Duration::seconds(offset_seconds));
    task
}

fn application(id: u32, deadline: NaiveDate) -> Application {
    Application::new(id, format!("University {id}"), "MSc", "Country", deadline)
}

fn alerts_for_tasks(tasks: &[StudyTask]) -> Vec<Alert> {
    derive_alerts(tasks, &[], now(), &AlertPolicy::default())
}

fn alerts_for_applications(applications: &[Application]) -> Vec<Alert> {
    derive_alerts(&[], applications, now(), &AlertPolicy::default())
}

fn find<'a>(alerts: &'a [Alert], id: &str) -> Option<&'a Alert> {
    alerts.iter().find(|alert| alert.id == id)
}

#[test]
fn due_soon_ranks_today_before_tomorrow_and_skips_distant_tasks() {
    let tasks = vec![
        task("later", today_plus(10), TaskPriority::Medium),
        task("tomorrow", today_plus(1), TaskPriority::Medium),
        task("today", today_plus(0), TaskPriority::Medium),
    ];
    let alerts = alerts_for_tasks(&tasks);

    let due_soon: Vec<&str> = alerts
        .iter()
        .filter(|alert| alert.kind == AlertKind::DueSoon)
        .map(|alert| alert.id.as_str())
        .collect();
    assert_eq!(due_soon, vec!["due-soon-today", "due-soon-tomorrow"]);

    let today = find(&alerts, "due-soon-today").unwrap();
    assert_eq!(today.priority, TaskPriority::High);
    assert_eq!(today.icon, AlertIcon::Clock);
    assert!(today.message.contains("due today"));
    assert_eq!(
        find(&alerts, "due-soon-tomorrow").unwrap().priority,
        TaskPriority::Medium
    );
    assert!(find(&alerts, "due-soon-later").is_none());
}

#[test]
fn due_soon_window_is_inclusive_and_respects_task_priority() {
    let tasks = vec![
        task("edge", today_plus(3), TaskPriority::Low),
        task("beyond", today_plus(4), TaskPriority::High),
        task("urgent", today_plus(2), TaskPriority::High),
    ];
    let alerts = alerts_for_tasks(&tasks);

    let edge = find(&alerts, "due-soon-edge").unwrap();
    assert_eq!(edge.priority, TaskPriority::Medium);
    assert!(edge.message.contains("in 3 days"));
    assert!(find(&alerts, "due-soon-beyond").is_none());
    assert_eq!(
        find(&alerts, "due-soon-urgent").unwrap().priority,
        TaskPriority::High
    );
}

#[test]
fn overdue_reports_whole_days() {
    let mut done = task("done", today_plus(-5), TaskPriority::Low);
    done.completed = true;
    let tasks = vec![
        task("late", today_plus(-2), TaskPriority::Low),
        task("yesterday", today_plus(-1), TaskPriority::Low),
        done,
    ];
    let alerts = alerts_for_tasks(&tasks);

    let late = find(&alerts, "overdue-late").unwrap();
    assert_eq!(late.kind, AlertKind::Overdue);
    assert_eq!(late.priority, TaskPriority::High);
    assert!(late.message.contains("2 days overdue"), "{}", late.message);
    assert!(find(&alerts, "overdue-yesterday")
        .unwrap()
        .message
        .contains("1 day overdue"));
    assert!(find(&alerts, "overdue-done").is_none());
    assert!(find(&alerts, "due-soon-late").is_none());
}

#[test]
fn task_reminders_fire_inside_window_only() {
    let base = today_plus(20);
    let tasks = vec![
        with_reminder(task("soon", base, TaskPriority::Low), 30),
        with_reminder(task("passed", base, TaskPriority::Low), -20),
        with_reminder(task("hours", base, TaskPriority::Low), 150),
        with_reminder(task("edge", base, TaskPriority::Low), 24 * 60),
        with_reminder(task("too-late", base, TaskPriority::Low), -61),
        with_reminder(task("too-early", base, TaskPriority::Low), 24 * 60 + 1),
        with_reminder_seconds(task("under-a-minute", base, TaskPriority::Low), 40),
        with_reminder_seconds(task("just-passed", base, TaskPriority::Low), -30),
        with_reminder_seconds(task("lookback-edge", base, TaskPriority::Low), -60 * 60),
        with_reminder_seconds(task("past-lookback", base, TaskPriority::Low), -(60 * 60 + 59)),
    ];
    let alerts = alerts_for_tasks(&tasks);

    let soon = find(&alerts, "reminder-soon").unwrap();
    assert_eq!(soon.kind, AlertKind::Reminder);
    assert_eq!(soon.priority, TaskPriority::Medium);
    assert!(soon.message.contains("in 30 minutes"));

    let passed = find(&alerts, "reminder-passed").unwrap();
    assert_eq!(passed.priority, TaskPriority::High);
    assert!(passed.message.contains("20 minutes ago"));

    assert!(find(&alerts, "reminder-hours")
        .unwrap()
        .message
        .contains("in 2 hours"));
    assert!(find(&alerts, "reminder-edge").is_some());
    assert!(find(&alerts, "reminder-too-late").is_none());
    assert!(find(&alerts, "reminder-too-early").is_none());

    let upcoming = find(&alerts, "reminder-under-a-minute").unwrap();
    assert_eq!(upcoming.priority, TaskPriority::Medium);
    let just_passed = find(&alerts, "reminder-just-passed").unwrap();
    assert_eq!(just_passed.priority, TaskPriority::High);
    assert!(just_passed.message.contains("1 minute ago"));
    assert!(find(&alerts, "reminder-lookback-edge")
        .unwrap()
        .message
        .contains("60 minutes ago"));
    assert!(find(&alerts, "reminder-past-lookback").is_none());
}

#[test]
fn reminders_on_completed_or_disabled_tasks_are_ignored() {
    let mut completed = with_reminder(task("completed", today_plus(20), TaskPriority::Low), 10);
    completed.completed = true;
    let mut disabled = with_reminder(task("disabled", today_plus(20), TaskPriority::Low), 10);
    disabled.reminder = false;

    assert!(alerts_for_tasks(&[completed, disabled]).is_empty());
}

#[test]
fn application_deadlines_use_tiered_priorities() {
    let applications = vec![
        application(1, today_plus(5)),
        application(2, today_plus(10)),
        application(3, today_plus(20)),
        application(4, today_plus(31)),
        application(5, today_plus(-1)),
        application(6, today_plus(30)),
    ];
    let alerts = alerts_for_applications(&applications);

    let priority = |id: &str| find(&alerts, id).map(|alert| alert.priority);
    assert_eq!(priority("deadline-1"), Some(TaskPriority::High));
    assert_eq!(priority("deadline-2"), Some(TaskPriority::Medium));
    assert_eq!(priority("deadline-3"), Some(TaskPriority::Low));
    assert_eq!(priority("deadline-4"), None);
    assert_eq!(priority("deadline-5"), None);
    assert_eq!(priority("deadline-6"), Some(TaskPriority::Low));

    let first = find(&alerts, "deadline-1").unwrap();
    assert_eq!(first.kind, AlertKind::ApplicationDeadline);
    assert_eq!(first.icon, AlertIcon::GraduationCap);
    assert!(first.message.contains("in 5 days"));
}

#[test]
fn terminal_applications_can_be_skipped_by_policy() {
    let applications =
        vec![application(1, today_plus(5)).with_status(ApplicationStatus::Accepted)];

    assert_eq!(alerts_for_applications(&applications).len(), 1);

    let policy = AlertPolicy {
        skip_terminal_applications: true,
        ..AlertPolicy::default()
    };
    assert!(derive_alerts(&[], &applications, now(), &policy).is_empty());
}

#[test]
fn application_sub_tasks_due_within_two_weeks() {
    let app = application(7, today_plus(60))
        .with_task(ApplicationTask::new(1, "Essay").with_due_date(today_plus(2)))
        .with_task(ApplicationTask::new(2, "Scores").with_due_date(today_plus(6)))
        .with_task(ApplicationTask::new(3, "CV").with_due_date(today_plus(12)))
        .with_task(ApplicationTask::new(4, "Visa").with_due_date(today_plus(15)))
        .with_task(
            ApplicationTask::new(5, "Fee")
                .with_due_date(today_plus(1))
                .completed(true),
        )
        .with_task(ApplicationTask::new(6, "Interview prep"));
    let alerts = alerts_for_applications(&[app]);

    let priority = |id: &str| find(&alerts, id).map(|alert| alert.priority);
    assert_eq!(priority("app-task-due-7-1"), Some(TaskPriority::High));
    assert_eq!(priority("app-task-due-7-2"), Some(TaskPriority::Medium));
    assert_eq!(priority("app-task-due-7-3"), Some(TaskPriority::Low));
    assert_eq!(priority("app-task-due-7-4"), None);
    assert_eq!(priority("app-task-due-7-5"), None);
    assert_eq!(priority("app-task-due-7-6"), None);
    assert_eq!(alerts.len(), 3);

    let essay = find(&alerts, "app-task-due-7-1").unwrap();
    assert_eq!(essay.kind, AlertKind::DueSoon);
    assert!(essay.message.contains("Essay for University 7"));
}

#[test]
fn application_reminders_fire_like_task_reminders() {
    let mut app = application(8, today_plus(60));
    app.reminder = true;
    app.reminder_date = Some(now() - Duration::minutes(30));
    let alerts = alerts_for_applications(&[app]);

    assert_eq!(alerts.len(), 1);
    let alert = &alerts[0];
    assert_eq!(alert.id, "app-reminder-8");
    assert_eq!(alert.kind, AlertKind::Reminder);
    assert_eq!(alert.priority, TaskPriority::High);
    assert!(alert.message.contains("30 minutes ago"));
}

#[test]
fn unvalidated_extreme_lookback_does_not_overflow() {
    let policy = AlertPolicy {
        reminder_lookback_minutes: i64::MIN,
        ..AlertPolicy::default()
    };
    let tasks = vec![with_reminder(task("long-ago", today_plus(20), TaskPriority::Low), -600)];
    let alerts = derive_alerts(&tasks, &[], now(), &policy);

    assert_eq!(
        find(&alerts, "reminder-long-ago").unwrap().priority,
        TaskPriority::High
    );
}

#[test]
fn application_reminder_under_a_minute_away_is_not_yet_due() {
    let mut app = application(9, today_plus(60));
    app.reminder = true;
    app.reminder_date = Some(now() + Duration::seconds(40));
    let alerts = alerts_for_applications(&[app]);

    let alert = find(&alerts, "app-reminder-9").unwrap();
    assert_eq!(alert.priority, TaskPriority::Medium);
}

#[test]
fn alerts_are_sorted_by_priority_then_date() {
    let tasks = vec![
        task("medium-early", today_plus(1), TaskPriority::Medium),
        task("high-late", today_plus(3), TaskPriority::High),
        task("high-early", today_plus(-4), TaskPriority::Low),
    ];
    let applications = vec![application(1, today_plus(25))];
    let alerts = derive_alerts(&tasks, &applications, now(), &AlertPolicy::default());

    let ids: Vec<&str> = alerts.iter().map(|alert| alert.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "overdue-high-early",
            "due-soon-high-late",
            "due-soon-medium-early",
            "deadline-1",
        ]
    );
    for pair in alerts.windows(2) {
        assert!(pair[0].priority.rank() >= pair[1].priority.rank());
    }
}

#[test]
fn store_alerts_include_derived_application_tasks() {
    let mut store = AppDataStore::new();
    store
        .add_application(
            application(3, today_plus(40))
                .with_task(ApplicationTask::new(1, "Essay").with_due_date(today_plus(1))),
        )
        .unwrap();

    let alerts = store.alerts(now());
    assert!(find(&alerts, "due-soon-app-task-3-1").is_some());
    assert!(find(&alerts, "app-task-due-3-1").is_some());
    assert!(find(&alerts, "deadline-3").is_none(), "40 days is outside window");
}
