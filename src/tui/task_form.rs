//! Modal form for creating and editing task cards on the board.

use crate::error::{DashResult, DashboardError};
use crate::fields::TaskStatus;
use crate::task::{Task, TaskDraft};
use crate::tui::input::InputField;

pub const TITLE_ORDER: usize = 0;
pub const DESCRIPTION_ORDER: usize = 1;
pub const STATUS_ORDER: usize = 2;

const FIELD_COUNT: usize = 3;

/// Task form for editing fields
pub struct TaskForm {
    pub title: InputField,
    pub description: InputField,
    /// Index into `TaskStatus::ALL`.
    pub status: usize,
    pub current_field: usize,
    /// Id of the card being edited; `None` creates a new card.
    pub editing: Option<String>,
    pub error: Option<String>,
}

impl TaskForm {
    /// Empty form for a new card, preset to `status`'s column.
    pub fn new(status: TaskStatus) -> Self {
        let mut form = TaskForm {
            title: InputField::new(),
            description: InputField::new(),
            status: status.index(),
            current_field: TITLE_ORDER,
            editing: None,
            error: None,
        };
        form.update_active_field();
        form
    }

    pub fn from_task(task: &Task) -> Self {
        let mut form = Self::new(task.status);
        form.title = InputField::with_value(&task.title);
        form.description = InputField::with_value(&task.description);
        form.editing = Some(task.id.clone());
        form.update_active_field();
        form
    }

    pub fn heading(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Task"
        } else {
            "Create New Task"
        }
    }

    pub fn selected_status(&self) -> TaskStatus {
        TaskStatus::ALL[self.status % TaskStatus::ALL.len()]
    }

    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    pub fn prev_field(&mut self) {
        self.current_field = (self.current_field + FIELD_COUNT - 1) % FIELD_COUNT;
        self.update_active_field();
    }

    fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_ORDER;
        self.description.active = self.current_field == DESCRIPTION_ORDER;
    }

    pub fn handle_char(&mut self, c: char) {
        match self.current_field {
            TITLE_ORDER => self.title.handle_char(c),
            DESCRIPTION_ORDER => self.description.handle_char(c),
            _ => {}
        }
    }

    pub fn handle_backspace(&mut self) {
        match self.current_field {
            TITLE_ORDER => self.title.handle_backspace(),
            DESCRIPTION_ORDER => self.description.handle_backspace(),
            _ => {}
        }
    }

    /// Cursor movement on text fields, column choice on the status selector.
    pub fn handle_left_right(&mut self, right: bool) {
        let len = TaskStatus::ALL.len();
        match self.current_field {
            TITLE_ORDER => {
                if right {
                    self.title.move_cursor_right()
                } else {
                    self.title.move_cursor_left()
                }
            }
            DESCRIPTION_ORDER => {
                if right {
                    self.description.move_cursor_right()
                } else {
                    self.description.move_cursor_left()
                }
            }
            STATUS_ORDER => {
                self.status = if right {
                    (self.status + 1) % len
                } else {
                    (self.status + len - 1) % len
                };
            }
            _ => {}
        }
    }

    /// Validated draft. Title and description are both required.
    pub fn draft(&mut self) -> DashResult<TaskDraft> {
        let result = if self.title.value.trim().is_empty() {
            Err(DashboardError::MissingField("title"))
        } else if self.description.value.trim().is_empty() {
            Err(DashboardError::MissingField("description"))
        } else {
            Ok(TaskDraft {
                title: self.title.value.trim().to_string(),
                description: self.description.value.trim().to_string(),
                status: self.selected_status(),
            })
        };
        self.error = result.as_ref().err().map(|e| e.to_string());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_selector_wraps() {
        let mut form = TaskForm::new(TaskStatus::ToDo);
        form.current_field = STATUS_ORDER;
        form.handle_left_right(false);
        assert_eq!(form.selected_status(), TaskStatus::Completed);
        form.handle_left_right(true);
        assert_eq!(form.selected_status(), TaskStatus::ToDo);
    }

    #[test]
    fn test_draft_requires_title_and_description() {
        let mut form = TaskForm::new(TaskStatus::InProgress);
        form.handle_char('Q');
        form.handle_char('A');
        assert!(form.draft().is_err());
        assert!(form.error.as_deref().unwrap().contains("description"));

        form.next_field();
        for c in "Regression pass".chars() {
            form.handle_char(c);
        }
        let draft = form.draft().unwrap();
        assert_eq!(draft.title, "QA");
        assert_eq!(draft.status, TaskStatus::InProgress);
        assert!(form.error.is_none());
    }

    #[test]
    fn test_typing_on_selector_is_ignored() {
        let mut form = TaskForm::new(TaskStatus::ToDo);
        form.prev_field();
        assert_eq!(form.current_field, STATUS_ORDER);
        form.handle_char('x');
        assert!(form.title.value.is_empty());
        assert!(form.description.value.is_empty());
    }
}
