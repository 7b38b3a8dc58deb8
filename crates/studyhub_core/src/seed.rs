//! Built-in fixture set loaded by `AppDataStore::with_seed_data`.

use crate::model::application::{Application, ApplicationStatus, ApplicationTask};
use crate::model::study_task::{StudyTask, StudyTaskId, TaskPriority};
use chrono::NaiveDate;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("seed dates are valid calendar dates")
}

pub(crate) fn seed_applications() -> Vec<Application> {
    vec![
        Application::new(
            1,
            "Massachusetts Institute of Technology",
            "Computer Science PhD",
            "United States",
            day(2025, 12, 15),
        )
        .with_status(ApplicationStatus::InProgress)
        .with_task(
            ApplicationTask::new(1, "Statement of Purpose")
                .with_due_date(day(2025, 11, 20))
                .completed(true),
        )
        .with_task(
            ApplicationTask::new(2, "Letters of Recommendation").with_due_date(day(2025, 12, 1)),
        )
        .with_task(ApplicationTask::new(3, "GRE Scores").completed(true)),
        Application::new(
            2,
            "University of Oxford",
            "MSc Data Science",
            "United Kingdom",
            day(2026, 1, 10),
        )
        .with_task(ApplicationTask::new(1, "Research Proposal").with_due_date(day(2025, 12, 20)))
        .with_task(ApplicationTask::new(2, "Official Transcripts")),
        Application::new(
            3,
            "ETH Zurich",
            "MSc Robotics",
            "Switzerland",
            day(2025, 11, 30),
        )
        .with_status(ApplicationStatus::Submitted)
        .with_task(ApplicationTask::new(1, "Project Portfolio").completed(true)),
    ]
}

pub(crate) fn seed_study_tasks() -> Vec<StudyTask> {
    vec![
        authored(
            "study-1",
            "Linear Algebra Problem Set",
            "Mathematics",
            day(2025, 11, 5),
            TaskPriority::High,
            3.0,
        ),
        authored(
            "study-2",
            "Read Chapter 4: Neural Networks",
            "Machine Learning",
            day(2025, 11, 7),
            TaskPriority::Medium,
            2.0,
        ),
        authored(
            "study-3",
            "IELTS Practice Test",
            "English",
            day(2025, 11, 12),
            TaskPriority::Low,
            1.5,
        ),
    ]
}

fn authored(
    id: &str,
    task: &str,
    subject: &str,
    date: NaiveDate,
    priority: TaskPriority,
    estimated_hours: f32,
) -> StudyTask {
    StudyTask {
        id: StudyTaskId::Authored(id.to_string()),
        task: task.to_string(),
        subject: subject.to_string(),
        date,
        completed: false,
        priority,
        estimated_hours,
        reminder: false,
        reminder_date: None,
    }
}
