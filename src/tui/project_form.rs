//! Create/edit form for a single project.
//!
//! The form binds to whatever record is selected in the store when it is
//! opened: with a selection it edits that record, without one it creates a
//! new record stamped with the next free id.

use chrono::NaiveDate;
use tracing::info;

use crate::error::DashResult;
use crate::fields::PROJECT_STATUSES;
use crate::project::ProjectDraft;
use crate::store::ProjectStore;
use crate::tui::input::InputField;

/// Field order, matching the on-screen grid (left column first).
pub const NAME_ORDER: usize = 0;
pub const STATUS_ORDER: usize = 1;
pub const PROGRESS_ORDER: usize = 2;
pub const DESCRIPTION_ORDER: usize = 3;
pub const DEADLINE_ORDER: usize = 4;

const FIELD_COUNT: usize = 5;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FormMode {
    Create,
    Edit,
}

pub struct ProjectForm {
    pub id: u64,
    pub mode: FormMode,
    pub name: InputField,
    pub status: InputField,
    pub progress: InputField,
    pub description: InputField,
    pub deadline: InputField,
    pub current_field: usize,
    /// Last validation failure, shown under the form.
    pub error: Option<String>,
}

impl ProjectForm {
    /// Open the form against the store's current selection.
    pub fn for_store(store: &ProjectStore) -> Self {
        match store.selected() {
            Some(project) => Self::from_draft(ProjectDraft::from_project(project), FormMode::Edit),
            None => {
                let mut draft = ProjectDraft::blank(store.next_id());
                draft.status = PROJECT_STATUSES[0].to_string();
                Self::from_draft(draft, FormMode::Create)
            }
        }
    }

    pub fn from_draft(draft: ProjectDraft, mode: FormMode) -> Self {
        let mut form = ProjectForm {
            id: draft.id,
            mode,
            name: InputField::with_value(&draft.name),
            status: InputField::with_value(&draft.status),
            progress: InputField::with_value(&draft.progress),
            description: InputField::with_value(&draft.description),
            deadline: InputField::with_value(&draft.deadline),
            current_field: NAME_ORDER,
            error: None,
        };
        form.update_active_field();
        form
    }

    pub fn title(&self) -> String {
        match self.mode {
            FormMode::Create => format!("New Project #{}", self.id),
            FormMode::Edit => format!("Edit Project #{}", self.id),
        }
    }

    /// Snapshot of the current input as a draft.
    pub fn draft(&self) -> ProjectDraft {
        ProjectDraft {
            id: self.id,
            name: self.name.value.clone(),
            description: self.description.value.clone(),
            status: self.status.value.clone(),
            progress: self.progress.value.clone(),
            deadline: self.deadline.value.clone(),
        }
    }

    /// Labelled fields in navigation order.
    pub fn fields(&self) -> [(&'static str, &InputField); FIELD_COUNT] {
        [
            ("Project Name", &self.name),
            ("Status", &self.status),
            ("Progress (%)", &self.progress),
            ("Description", &self.description),
            ("Deadline", &self.deadline),
        ]
    }

    fn current_mut(&mut self) -> &mut InputField {
        match self.current_field {
            STATUS_ORDER => &mut self.status,
            PROGRESS_ORDER => &mut self.progress,
            DESCRIPTION_ORDER => &mut self.description,
            DEADLINE_ORDER => &mut self.deadline,
            _ => &mut self.name,
        }
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
        for field in [
            &mut self.name,
            &mut self.status,
            &mut self.progress,
            &mut self.description,
            &mut self.deadline,
        ] {
            field.active = false;
        }
        self.current_mut().active = true;
    }

    pub fn handle_char(&mut self, c: char) {
        self.current_mut().handle_char(c);
    }

    pub fn handle_backspace(&mut self) {
        self.current_mut().handle_backspace();
    }

    pub fn handle_delete(&mut self) {
        self.current_mut().handle_delete();
    }

    pub fn handle_left_right(&mut self, right: bool) {
        let field = self.current_mut();
        if right {
            field.move_cursor_right();
        } else {
            field.move_cursor_left();
        }
    }

    pub fn handle_home_end(&mut self, end: bool) {
        let field = self.current_mut();
        if end {
            field.move_end();
        } else {
            field.move_home();
        }
    }

    /// Replace the status text with the next (or previous) preset. Free text
    /// that matches no preset jumps to the first one.
    pub fn cycle_status(&mut self, forward: bool) {
        let len = PROJECT_STATUSES.len();
        let next = match PROJECT_STATUSES
            .iter()
            .position(|s| s.eq_ignore_ascii_case(self.status.value.trim()))
        {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.status.set_value(PROJECT_STATUSES[next]);
    }

    /// Validate and write the record into the store, then clear the
    /// selection. On a validation error the store is untouched and the
    /// message is kept on the form.
    pub fn submit(&mut self, store: &mut ProjectStore, today: NaiveDate) -> DashResult<FormMode> {
        let project = match self.draft().into_project(today) {
            Ok(project) => project,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e);
            }
        };
        match self.mode {
            FormMode::Edit => {
                info!(id = project.id, "Saving project from form");
                store.update(project);
            }
            FormMode::Create => {
                info!(id = project.id, "Creating project from form");
                store.add(project);
            }
        }
        store.select(None);
        self.error = None;
        Ok(self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn seeded_store() -> ProjectStore {
        let mut store = ProjectStore::open(Box::new(MemoryStorage::new()));
        store.initialize();
        store
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
    }

    fn type_text(form: &mut ProjectForm, text: &str) {
        for c in text.chars() {
            form.handle_char(c);
        }
    }

    #[test]
    fn test_without_selection_opens_create_mode() {
        let store = seeded_store();
        let form = ProjectForm::for_store(&store);
        assert_eq!(form.mode, FormMode::Create);
        assert_eq!(form.id, store.next_id());
        assert_eq!(form.status.value, "Not Started");
        assert!(form.name.active);
    }

    #[test]
    fn test_with_selection_opens_edit_mode() {
        let mut store = seeded_store();
        let first = store.get(1).cloned();
        store.select(first);
        let form = ProjectForm::for_store(&store);
        assert_eq!(form.mode, FormMode::Edit);
        assert_eq!(form.name.value, "Website Redesign");
        assert_eq!(form.progress.value, "65");
        assert_eq!(form.deadline.value, "2023-06-30");
    }

    #[test]
    fn test_submit_create_adds_and_clears_selection() {
        let mut store = seeded_store();
        let mut form = ProjectForm::for_store(&store);
        type_text(&mut form, "Docs Portal");
        form.next_field();
        form.cycle_status(true);
        form.next_field();
        type_text(&mut form, "10");
        form.next_field();
        type_text(&mut form, "Internal docs");
        form.next_field();
        type_text(&mut form, "in 2w");

        assert_eq!(form.submit(&mut store, today()).unwrap(), FormMode::Create);
        let added = store.get(4).unwrap();
        assert_eq!(added.name, "Docs Portal");
        assert_eq!(added.status, "In Progress");
        assert_eq!(added.progress, 10);
        assert_eq!(added.deadline, NaiveDate::from_ymd_opt(2023, 6, 15).unwrap());
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_submit_edit_updates_in_place() {
        let mut store = seeded_store();
        let first = store.get(1).cloned();
        store.select(first);
        let mut form = ProjectForm::for_store(&store);
        form.current_field = PROGRESS_ORDER;
        form.progress.set_value("140");

        assert_eq!(form.submit(&mut store, today()).unwrap(), FormMode::Edit);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(1).unwrap().progress, 100);
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_invalid_submit_keeps_store_and_message() {
        let mut store = seeded_store();
        let mut form = ProjectForm::for_store(&store);
        type_text(&mut form, "Half filled");

        assert!(form.submit(&mut store, today()).is_err());
        assert_eq!(store.len(), 3);
        assert!(form.error.as_deref().unwrap().contains("description"));
    }

    #[test]
    fn test_status_cycle_wraps() {
        let store = seeded_store();
        let mut form = ProjectForm::for_store(&store);
        form.cycle_status(false);
        assert_eq!(form.status.value, "Completed");
        form.cycle_status(true);
        assert_eq!(form.status.value, "Not Started");
        form.status.set_value("Blocked");
        form.cycle_status(true);
        assert_eq!(form.status.value, "Not Started");
    }
}
