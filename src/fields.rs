//! Status vocabularies for projects and board tasks.
//!
//! Project status is an open set of labels: the presets below are what the
//! forms offer, but any string is accepted and stored verbatim. Task status is
//! a closed set that doubles as the board's column identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const PROJECT_NOT_STARTED: &str = "Not Started";
pub const PROJECT_IN_PROGRESS: &str = "In Progress";
pub const PROJECT_COMPLETED: &str = "Completed";

/// Project status labels offered as presets by the forms.
pub const PROJECT_STATUSES: [&str; 3] = [PROJECT_NOT_STARTED, PROJECT_IN_PROGRESS, PROJECT_COMPLETED];

/// Board column a task lives in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// All columns in board order.
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Completed];

    /// Column identifier, which is also the display label.
    pub fn column_id(self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Resolve a drop target identifier to a column. Anything else is not a column.
    pub fn from_column_id(id: &str) -> Option<TaskStatus> {
        TaskStatus::ALL.into_iter().find(|s| s.column_id() == id)
    }

    /// Zero-based position on the board.
    pub fn index(self) -> usize {
        match self {
            TaskStatus::ToDo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Completed => 2,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_ids_resolve_back() {
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::from_column_id(status.column_id()), Some(status));
        }
        assert_eq!(TaskStatus::from_column_id("to do"), None);
        assert_eq!(TaskStatus::from_column_id("Backlog"), None);
    }

    #[test]
    fn test_serialises_as_column_label() {
        let json = serde_json::to_string(&TaskStatus::ToDo).unwrap();
        assert_eq!(json, "\"To Do\"");
        let back: TaskStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(back, TaskStatus::InProgress);
    }
}
