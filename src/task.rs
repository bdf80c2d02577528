//! Board tasks.
//!
//! Tasks live only for as long as the board is open; nothing here is
//! persisted.

use crate::fields::TaskStatus;

/// A card on the task board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    /// Project the card belongs to. Not checked against the store.
    pub project_id: u64,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

/// The editable part of a task, as captured by the board's form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        TaskDraft {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
        }
    }
}

/// Cards a freshly opened board starts with.
pub fn seed_tasks(project_id: u64) -> Vec<Task> {
    let task = |id: &str, title: &str, description: &str, status| Task {
        id: id.to_string(),
        project_id,
        title: title.to_string(),
        description: description.to_string(),
        status,
    };
    vec![
        task("1", "Wireframe Design", "Create wireframes", TaskStatus::Completed),
        task("2", "Frontend Dev", "React Implementation", TaskStatus::InProgress),
        task("3", "User Testing", "Conduct sessions", TaskStatus::ToDo),
    ]
}
