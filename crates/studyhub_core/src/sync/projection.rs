//! Pure projection and replace-in-place helpers.

use crate::model::application::{Application, ApplicationId, ApplicationTask};
use crate::model::study_task::{StudyTask, StudyTaskId, TaskPriority, APPLICATIONS_SUBJECT};
use log::debug;

const DEADLINE_TASK_HOURS: f32 = 1.0;
const SUB_TASK_HOURS: f32 = 2.0;

/// Computes the full derived task set for one application.
///
/// Order is the deadline task followed by sub-tasks in checklist order.
pub fn project_application(application: &Application) -> Vec<StudyTask> {
    let mut derived = Vec::with_capacity(application.tasks.len() + 1);
    derived.push(deadline_task(application));
    derived.extend(
        application
            .tasks
            .iter()
            .map(|sub_task| sub_task_task(application, sub_task)),
    );
    derived
}

/// Replaces every derived entry of `application` inside `tasks`.
///
/// Idempotent: repeated calls with unchanged input leave `tasks` unchanged.
pub fn sync_application_to_study(tasks: &mut Vec<StudyTask>, application: &Application) {
    let removed = remove_derived_tasks(tasks, application.id);
    let derived = project_application(application);
    let derived_count = derived.len();
    tasks.extend(derived);
    debug!(
        "event=application_synced module=sync application_id={} removed={} derived={}",
        application.id, removed, derived_count
    );
}

/// Drops all tasks derived from `application_id`. Returns how many went.
pub fn remove_derived_tasks(tasks: &mut Vec<StudyTask>, application_id: ApplicationId) -> usize {
    let before = tasks.len();
    tasks.retain(|task| task.id.application_id() != Some(application_id));
    before - tasks.len()
}

fn deadline_task(application: &Application) -> StudyTask {
    StudyTask {
        id: StudyTaskId::Deadline(application.id),
        task: format!(
            "{} - {} Application Deadline",
            application.university, application.program
        ),
        subject: APPLICATIONS_SUBJECT.to_string(),
        date: application.effective_date(),
        completed: application.status.is_terminal(),
        priority: TaskPriority::High,
        estimated_hours: DEADLINE_TASK_HOURS,
        reminder: application.reminder,
        reminder_date: application.reminder_date,
    }
}

fn sub_task_task(application: &Application, sub_task: &ApplicationTask) -> StudyTask {
    StudyTask {
        id: StudyTaskId::SubTask(application.id, sub_task.id),
        task: format!("{} ({})", sub_task.task, application.university),
        subject: APPLICATIONS_SUBJECT.to_string(),
        date: sub_task.effective_date(application.deadline),
        completed: sub_task.completed,
        priority: TaskPriority::Medium,
        estimated_hours: SUB_TASK_HOURS,
        reminder: sub_task.reminder,
        reminder_date: sub_task.reminder_date,
    }
}
