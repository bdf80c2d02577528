//! In-memory kanban board over tasks for one project.
//!
//! Tasks are grouped into the fixed `TaskStatus` columns. Moving a card is
//! modelled on a drag gesture: the dragged card's id plus the id of whatever
//! it was released over.

use tracing::debug;
use uuid::Uuid;

use crate::fields::TaskStatus;
use crate::task::{seed_tasks, Task, TaskDraft};

/// Project the default board shows.
pub const DEFAULT_BOARD_PROJECT: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBoard {
    project_id: u64,
    tasks: Vec<Task>,
}

impl TaskBoard {
    /// Empty board for `project_id`.
    pub fn new(project_id: u64) -> Self {
        TaskBoard {
            project_id,
            tasks: Vec::new(),
        }
    }

    /// Board for `project_id` starting from that project's seed cards.
    pub fn seeded(project_id: u64) -> Self {
        let mut board = TaskBoard::new(project_id);
        board.tasks = seed_tasks(project_id);
        board
    }

    pub fn project_id(&self) -> u64 {
        self.project_id
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Cards shown in `status`'s column, in insertion order. Only cards of
    /// this board's project are shown.
    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| t.status == status && t.project_id == self.project_id)
            .collect()
    }

    /// Append a new card with a fresh random id. Returns the id.
    pub fn create(&mut self, draft: TaskDraft) -> String {
        let id = Uuid::new_v4().to_string();
        debug!(%id, title = %draft.title, "create task");
        self.tasks.push(Task {
            id: id.clone(),
            project_id: self.project_id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
        });
        id
    }

    /// Overwrite the editable fields of the card with `id`.
    pub fn edit(&mut self, id: &str, draft: TaskDraft) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.title = draft.title;
        task.description = draft.description;
        task.status = draft.status;
        true
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Move the card with `id` into `status`'s column. Returns false when the
    /// card is missing or already there.
    pub fn move_to(&mut self, id: &str, status: TaskStatus) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) if task.status != status => {
                debug!(%id, from = %task.status, to = %status, "move task");
                task.status = status;
                true
            }
            _ => false,
        }
    }

    /// Finish a drag of card `active` released over `over`.
    ///
    /// Released outside any target, over itself, or over something that is
    /// not a column: nothing happens.
    pub fn handle_drag_end(&mut self, active: &str, over: Option<&str>) -> bool {
        let Some(over) = over else {
            return false;
        };
        if over == active {
            return false;
        }
        match TaskStatus::from_column_id(over) {
            Some(status) => self.move_to(active, status),
            None => false,
        }
    }
}

impl Default for TaskBoard {
    fn default() -> Self {
        TaskBoard::seeded(DEFAULT_BOARD_PROJECT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(board: &TaskBoard, status: TaskStatus) -> Vec<String> {
        board.column(status).iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_seeded_board_fills_each_column() {
        let board = TaskBoard::default();
        assert_eq!(titles(&board, TaskStatus::ToDo), ["User Testing"]);
        assert_eq!(titles(&board, TaskStatus::InProgress), ["Frontend Dev"]);
        assert_eq!(titles(&board, TaskStatus::Completed), ["Wireframe Design"]);
    }

    #[test]
    fn test_drag_to_other_column_changes_only_status() {
        let mut board = TaskBoard::default();
        let before = board.get("3").cloned().unwrap();
        assert_eq!(before.status, TaskStatus::ToDo);

        assert!(board.handle_drag_end("3", Some("Completed")));

        let after = board.get("3").unwrap();
        assert_eq!(after.status, TaskStatus::Completed);
        assert_eq!(
            Task {
                status: TaskStatus::ToDo,
                ..after.clone()
            },
            before
        );
        assert_eq!(board.get("1").unwrap().status, TaskStatus::Completed);
        assert_eq!(board.get("2").unwrap().status, TaskStatus::InProgress);
    }

    #[test]
    fn test_drag_noops() {
        let mut board = TaskBoard::default();
        let snapshot = board.clone();

        assert!(!board.handle_drag_end("3", Some("To Do")));
        assert!(!board.handle_drag_end("3", None));
        assert!(!board.handle_drag_end("3", Some("3")));
        assert!(!board.handle_drag_end("3", Some("Archive")));
        assert!(!board.handle_drag_end("missing", Some("Completed")));

        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_create_edit_delete() {
        let mut board = TaskBoard::default();
        let id = board.create(TaskDraft {
            title: "Launch".into(),
            description: "Go live".into(),
            status: TaskStatus::InProgress,
        });
        assert_eq!(board.tasks().len(), 4);
        assert_ne!(id, board.create(TaskDraft::default()));

        let created = board.get(&id).unwrap();
        assert_eq!(created.project_id, DEFAULT_BOARD_PROJECT);
        assert_eq!(titles(&board, TaskStatus::InProgress), ["Frontend Dev", "Launch"]);

        let mut draft = TaskDraft::from_task(created);
        draft.title = "Launch v2".into();
        draft.status = TaskStatus::Completed;
        assert!(board.edit(&id, draft));
        assert_eq!(board.get(&id).unwrap().title, "Launch v2");
        assert!(!board.edit("nope", TaskDraft::default()));

        assert!(board.delete(&id));
        assert!(!board.delete(&id));
        assert!(board.get(&id).is_none());
    }

    #[test]
    fn test_seeded_board_belongs_to_its_project() {
        let mut board = TaskBoard::seeded(2);
        assert_eq!(board.project_id(), 2);
        assert!(board.tasks().iter().all(|t| t.project_id == 2));
        assert_eq!(titles(&board, TaskStatus::ToDo), ["User Testing"]);

        board.create(TaskDraft {
            title: "Mine".into(),
            ..Default::default()
        });
        assert_eq!(titles(&board, TaskStatus::ToDo), ["User Testing", "Mine"]);
        assert!(TaskBoard::new(2).tasks().is_empty());
    }
}
