//! Small state enums shared by the dashboard screens.

/// Whether keystrokes go to a text field or are interpreted as commands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    None,
    Text,
    /// Typing a page number to jump to.
    Page,
}

/// A destructive action waiting for y/n.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Confirm {
    DeleteProject { id: u64, name: String },
    DeleteTask { id: String, title: String },
}

impl Confirm {
    /// Line shown in the confirmation popup.
    pub fn describe(&self) -> String {
        match self {
            Confirm::DeleteProject { id, name } => format!("Delete project #{id} \"{name}\""),
            Confirm::DeleteTask { title, .. } => format!("Delete task \"{title}\""),
        }
    }
}
