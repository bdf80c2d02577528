//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{TaskStatus, PROJECT_COMPLETED, PROJECT_IN_PROGRESS, PROJECT_NOT_STARTED};

/// Accent used for the header, navigation highlight and status bar.
pub const TEAL: Color = Color::Rgb(0, 110, 120);
/// Used for "Completed"
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Used for "In Progress"
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Used for destructive prompts
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);

/// Foreground for a project status label. Unknown labels stay white.
pub fn project_status_color(status: &str) -> Color {
    match status {
        s if s.eq_ignore_ascii_case(PROJECT_COMPLETED) => DARK_GREEN,
        s if s.eq_ignore_ascii_case(PROJECT_IN_PROGRESS) => GOLD,
        s if s.eq_ignore_ascii_case(PROJECT_NOT_STARTED) => Color::Gray,
        _ => Color::White,
    }
}

/// Border color of a board column.
pub fn column_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::ToDo => Color::Gray,
        TaskStatus::InProgress => GOLD,
        TaskStatus::Completed => DARK_GREEN,
    }
}
