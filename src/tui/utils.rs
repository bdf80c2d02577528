//! Layout and popup helpers shared by the screens.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::tui::colors::DARK_RED;
use crate::tui::enums::Confirm;

/// A rectangle of `percent_x` by `percent_y` centered in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Centered y/n popup for a pending destructive action.
pub fn render_confirm(f: &mut Frame, confirm: &Confirm) {
    let area = centered_rect(50, 20, f.area());
    f.render_widget(Clear, area);
    let popup = Paragraph::new(vec![
        Line::from(format!("{}?", confirm.describe())),
        Line::from(""),
        Line::from("y: Yes | any other key: No"),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Confirm")
            .border_style(Style::default().fg(DARK_RED).add_modifier(Modifier::BOLD)),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(popup, area);
}
