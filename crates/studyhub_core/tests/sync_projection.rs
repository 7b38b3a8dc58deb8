use chrono::NaiveDate;
use studyhub_core::{
    project_application, sync_application_to_study, Application, ApplicationId, ApplicationStatus,
    ApplicationTask, StudyTask, StudyTaskId, SubTaskId, TaskPriority, TaskSource,
    APPLICATIONS_SUBJECT,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_application() -> Application {
    Application::new(1, "Stanford", "MS CS", "United States", day(2025, 12, 1))
        .with_task(ApplicationTask::new(1, "Essay").with_due_date(day(2025, 11, 10)))
        .with_task(ApplicationTask::new(2, "Transcripts"))
}

fn authored_task(token: &str) -> StudyTask {
    StudyTask {
        id: StudyTaskId::authored(token).unwrap(),
        task: "Calculus review".to_string(),
        subject: "Math".to_string(),
        date: day(2025, 11, 1),
        completed: false,
        priority: TaskPriority::Low,
        estimated_hours: 1.0,
        reminder: false,
        reminder_date: None,
    }
}

#[test]
fn seeded_scenario_projects_deadline_and_sub_tasks() {
    let mut tasks = Vec::new();
    sync_application_to_study(&mut tasks, &sample_application());

    assert_eq!(tasks.len(), 3);
    assert!(tasks.iter().all(|task| !task.completed));
    assert!(tasks.iter().all(|task| task.source() == TaskSource::Application));
    assert!(tasks.iter().all(|task| task.subject == APPLICATIONS_SUBJECT));

    let deadline = &tasks[0];
    assert_eq!(deadline.id, StudyTaskId::Deadline(ApplicationId(1)));
    assert_eq!(deadline.id.to_string(), "app-deadline-1");
    assert_eq!(deadline.task, "Stanford - MS CS Application Deadline");
    assert_eq!(deadline.date, day(2025, 12, 1));
    assert_eq!(deadline.priority, TaskPriority::High);
    assert_eq!(deadline.estimated_hours, 1.0);

    let essay = &tasks[1];
    assert_eq!(essay.id.to_string(), "app-task-1-1");
    assert_eq!(essay.task, "Essay (Stanford)");
    assert_eq!(essay.date, day(2025, 11, 10));
    assert_eq!(essay.priority, TaskPriority::Medium);
    assert_eq!(essay.estimated_hours, 2.0);

    let transcripts = &tasks[2];
    assert_eq!(
        transcripts.id,
        StudyTaskId::SubTask(ApplicationId(1), SubTaskId(2))
    );
    assert_eq!(transcripts.date, day(2025, 12, 1), "falls back to deadline");
}

#[test]
fn sync_is_idempotent() {
    let application = sample_application();
    let mut tasks = vec![authored_task("study-1")];

    sync_application_to_study(&mut tasks, &application);
    let once = tasks.clone();
    sync_application_to_study(&mut tasks, &application);

    assert_eq!(tasks, once);
    assert_eq!(tasks.len(), 4);
}

#[test]
fn sync_removes_stale_sub_tasks_when_checklist_shrinks() {
    let mut application = sample_application();
    let mut tasks = Vec::new();
    sync_application_to_study(&mut tasks, &application);

    application.tasks.retain(|task| task.id != SubTaskId(2));
    sync_application_to_study(&mut tasks, &application);

    assert_eq!(tasks.len(), 2);
    assert!(tasks
        .iter()
        .all(|task| task.id != StudyTaskId::SubTask(ApplicationId(1), SubTaskId(2))));
}

#[test]
fn sync_leaves_authored_and_other_application_tasks_alone() {
    let other = Application::new(2, "Oxford", "MSc", "UK", day(2026, 1, 10))
        .with_task(ApplicationTask::new(1, "Proposal"));
    let mut tasks = vec![authored_task("study-1")];
    sync_application_to_study(&mut tasks, &other);
    sync_application_to_study(&mut tasks, &sample_application());

    let mut changed = sample_application();
    changed.tasks.clear();
    sync_application_to_study(&mut tasks, &changed);

    let ids: Vec<String> = tasks.iter().map(|task| task.id.to_string()).collect();
    assert_eq!(
        ids,
        vec!["study-1", "app-deadline-2", "app-task-2-1", "app-deadline-1"]
    );
}

#[test]
fn terminal_status_marks_deadline_task_completed() {
    for status in [
        ApplicationStatus::Submitted,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ] {
        let application = sample_application().with_status(status);
        let derived = project_application(&application);
        assert!(derived[0].completed, "{status:?} should be terminal");
        assert!(!derived[1].completed, "sub-task completion is copied");
    }

    for status in [
        ApplicationStatus::Planning,
        ApplicationStatus::InProgress,
        ApplicationStatus::Interview,
        ApplicationStatus::Waitlisted,
    ] {
        let derived = project_application(&sample_application().with_status(status));
        assert!(!derived[0].completed, "{status:?} should stay actionable");
    }
}

#[test]
fn active_reminders_override_scheduled_dates() {
    let mut application = sample_application();
    application.reminder = true;
    application.reminder_date = day(2025, 11, 25).and_hms_opt(9, 0, 0);
    application.tasks[0].reminder = true;
    application.tasks[0].reminder_date = day(2025, 11, 3).and_hms_opt(20, 15, 0);

    let derived = project_application(&application);
    assert_eq!(derived[0].date, day(2025, 11, 25));
    assert!(derived[0].reminder);
    assert_eq!(derived[0].reminder_date, application.reminder_date);
    assert_eq!(derived[1].date, day(2025, 11, 3));
    assert_eq!(derived[1].reminder_date, application.tasks[0].reminder_date);

    application.reminder = false;
    let derived = project_application(&application);
    assert_eq!(derived[0].date, day(2025, 12, 1), "disabled reminder no longer overrides");
}
