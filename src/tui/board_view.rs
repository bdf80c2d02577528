//! Kanban task board screen.
//!
//! Cards live in three status columns. A card can be carried between columns
//! with the keyboard: Space picks the selected card up, Left/Right moves it
//! over the neighbouring column, Space drops it there and Esc puts it back.
//! Board state only lives as long as the screen is open.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use crate::board::TaskBoard;
use crate::fields::TaskStatus;
use crate::task::Task;
use crate::tui::colors::{column_color, GOLD, TEAL};
use crate::tui::enums::Confirm;
use crate::tui::task_form::{TaskForm, DESCRIPTION_ORDER, STATUS_ORDER, TITLE_ORDER};
use crate::tui::utils::{centered_rect, render_confirm};

const CARD_HEIGHT: u16 = 4;

/// What the board did with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardOutcome {
    Consumed,
    /// Not a board key; the caller may treat it as a global shortcut.
    Ignored,
    /// The user asked to leave the board.
    Leave,
}

#[derive(Debug, Clone)]
struct Drag {
    task_id: String,
    origin: usize,
}

pub struct BoardView {
    board: TaskBoard,
    selected_column: usize,
    selected_card: usize,
    drag: Option<Drag>,
    form: Option<TaskForm>,
    confirm: Option<Confirm>,
    status_message: String,
}

impl BoardView {
    pub fn new(board: TaskBoard) -> Self {
        BoardView {
            board,
            selected_column: 0,
            selected_card: 0,
            drag: None,
            form: None,
            confirm: None,
            status_message: String::new(),
        }
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    pub fn selected_column(&self) -> TaskStatus {
        TaskStatus::ALL[self.selected_column]
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// True while a text field has the keyboard.
    pub fn is_editing(&self) -> bool {
        self.form.is_some()
    }

    #[cfg(test)]
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    fn selected_task(&self) -> Option<&Task> {
        self.board
            .column(self.selected_column())
            .get(self.selected_card)
            .copied()
    }

    fn clamp_selection(&mut self) {
        let len = self.board.column(self.selected_column()).len();
        if len == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= len {
            self.selected_card = len - 1;
        }
    }

    fn select_task(&mut self, id: &str) {
        for (col, status) in TaskStatus::ALL.iter().enumerate() {
            if let Some(pos) = self.board.column(*status).iter().position(|t| t.id == id) {
                self.selected_column = col;
                self.selected_card = pos;
                return;
            }
        }
        self.clamp_selection();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> BoardOutcome {
        if self.form.is_some() {
            self.handle_form_key(key);
            return BoardOutcome::Consumed;
        }
        if let Some(confirm) = self.confirm.take() {
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                if let Confirm::DeleteTask { id, title } = confirm {
                    self.board.delete(&id);
                    self.clamp_selection();
                    self.status_message = format!("Deleted \"{title}\"");
                }
            } else {
                self.status_message = "Delete cancelled".to_string();
            }
            return BoardOutcome::Consumed;
        }
        if self.drag.is_some() {
            self.handle_drag_key(key);
            return BoardOutcome::Consumed;
        }

        let columns = TaskStatus::ALL.len();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_column = (self.selected_column + columns - 1) % columns;
                self.clamp_selection();
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected_column = (self.selected_column + 1) % columns;
                self.clamp_selection();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_card = self.selected_card.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected_card += 1;
                self.clamp_selection();
            }
            KeyCode::Char(' ') => self.pick_up(),
            KeyCode::Char('n') => {
                self.form = Some(TaskForm::new(self.selected_column()));
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                let form = self.selected_task().map(TaskForm::from_task);
                if form.is_some() {
                    self.form = form;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let confirm = self.selected_task().map(|task| Confirm::DeleteTask {
                    id: task.id.clone(),
                    title: task.title.clone(),
                });
                if confirm.is_some() {
                    self.confirm = confirm;
                }
            }
            KeyCode::Esc => return BoardOutcome::Leave,
            _ => return BoardOutcome::Ignored,
        }
        BoardOutcome::Consumed
    }

    fn pick_up(&mut self) {
        let Some((task_id, title)) = self.selected_task().map(|t| (t.id.clone(), t.title.clone()))
        else {
            return;
        };
        self.status_message = format!("Carrying \"{title}\"");
        self.drag = Some(Drag {
            task_id,
            origin: self.selected_column,
        });
    }

    fn handle_drag_key(&mut self, key: KeyEvent) {
        let columns = TaskStatus::ALL.len();
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected_column = (self.selected_column + 1).min(columns - 1);
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(drag) = self.drag.take() {
                    let over = self.selected_column().column_id();
                    if self.board.handle_drag_end(&drag.task_id, Some(over)) {
                        self.status_message = format!("Moved to {}", self.selected_column());
                    } else {
                        self.status_message = "Card left where it was".to_string();
                    }
                    self.select_task(&drag.task_id);
                }
            }
            KeyCode::Esc => {
                if let Some(drag) = self.drag.take() {
                    self.board.handle_drag_end(&drag.task_id, None);
                    self.selected_column = drag.origin;
                    self.select_task(&drag.task_id);
                    self.status_message = "Move cancelled".to_string();
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.form = None;
            }
            KeyCode::Enter => {
                let Ok(draft) = form.draft() else {
                    return;
                };
                match form.editing.clone() {
                    Some(id) => {
                        self.board.edit(&id, draft);
                        self.status_message = "Task updated".to_string();
                        self.select_task(&id);
                    }
                    None => {
                        let id = self.board.create(draft);
                        debug!(%id, "card created from board form");
                        self.status_message = "Task created".to_string();
                        self.select_task(&id);
                    }
                }
                self.form = None;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.handle_left_right(false),
            KeyCode::Right => form.handle_left_right(true),
            KeyCode::Backspace => form.handle_backspace(),
            KeyCode::Char(c) => form.handle_char(c),
            _ => {}
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        self.render_header(f, chunks[0]);
        self.render_columns(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);

        if let Some(form) = &self.form {
            render_task_form(f, form);
        } else if let Some(confirm) = &self.confirm {
            render_confirm(f, confirm);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled("TASK BOARD", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(
                format!("Project #{}", self.board.project_id()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_columns(&self, f: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        for (i, status) in TaskStatus::ALL.iter().enumerate() {
            self.render_column(f, columns[i], i, *status);
        }
    }

    fn render_column(&self, f: &mut Frame, area: Rect, index: usize, status: TaskStatus) {
        let focused = index == self.selected_column;
        let cards = self.board.column(status);

        let border_style = if focused {
            Style::default().fg(column_color(status)).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", status, cards.len()))
            .border_style(border_style);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut y = inner.y;
        let bottom = inner.y + inner.height;

        // Drop target marker while carrying a card over this column.
        if focused {
            if let Some(task) = self.drag.as_ref().and_then(|d| self.board.get(&d.task_id)) {
                if y < bottom {
                    let marker = Paragraph::new(format!("⇣ drop \"{}\" here", task.title))
                        .style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));
                    f.render_widget(marker, Rect::new(inner.x, y, inner.width, 1));
                    y += 1;
                }
            }
        }

        let visible = ((bottom.saturating_sub(y)) / CARD_HEIGHT).max(1) as usize;
        let offset = if focused && self.selected_card >= visible {
            self.selected_card + 1 - visible
        } else {
            0
        };

        for (pos, task) in cards.iter().enumerate().skip(offset) {
            if y + CARD_HEIGHT > bottom {
                break;
            }
            let selected = focused && self.drag.is_none() && pos == self.selected_card;
            let carried = self.drag.as_ref().is_some_and(|d| d.task_id == task.id);
            render_card(f, Rect::new(inner.x, y, inner.width, CARD_HEIGHT), task, selected, carried);
            y += CARD_HEIGHT;
        }
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if self.is_dragging() {
            "←/→: Carry | Space: Drop | Esc: Cancel".to_string()
        } else if !self.status_message.is_empty() {
            format!(
                "{} | Space: Pick up | n: New | e: Edit | d: Delete | Esc: Back",
                self.status_message
            )
        } else {
            "Space: Pick up | n: New | e: Edit | d: Delete | Esc: Back".to_string()
        };
        f.render_widget(
            Paragraph::new(text).style(Style::default().bg(TEAL).fg(Color::White)),
            area,
        );
    }
}

fn render_card(f: &mut Frame, area: Rect, task: &Task, selected: bool, carried: bool) {
    let style = if carried {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
    } else if selected {
        Style::default()
            .bg(column_color(task.status))
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray)
    };

    let card = Paragraph::new(vec![
        Line::from(Span::styled(task.title.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(task.description.clone()),
    ])
    .block(Block::default().borders(Borders::ALL))
    .style(style)
    .wrap(Wrap { trim: true });
    f.render_widget(card, area);
}

fn render_task_form(f: &mut Frame, form: &TaskForm) {
    let area = centered_rect(60, 50, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(form.heading())
        .title_alignment(Alignment::Center)
        .border_style(Style::default().fg(TEAL).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let field_style = |order: usize| {
        if form.current_field == order {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        }
    };

    for (order, label, field) in [
        (TITLE_ORDER, "Title *", &form.title),
        (DESCRIPTION_ORDER, "Description *", &form.description),
    ] {
        let widget = Paragraph::new(field.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(label)
                .border_style(field_style(order)),
        );
        f.render_widget(widget, rows[order]);
        if field.active {
            let x = rows[order].x + 1 + field.cursor as u16;
            f.set_cursor_position((x.min(rows[order].right().saturating_sub(2)), rows[order].y + 1));
        }
    }

    let status = form.selected_status();
    let selector = Paragraph::new(Line::from(vec![
        Span::raw("◀ "),
        Span::styled(status.to_string(), Style::default().fg(column_color(status))),
        Span::raw(" ▶"),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Status")
            .border_style(field_style(STATUS_ORDER)),
    );
    f.render_widget(selector, rows[STATUS_ORDER]);

    let footer = match &form.error {
        Some(error) => Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))),
        None => Line::from("Tab: Next field | Enter: Save | Esc: Cancel"),
    };
    f.render_widget(Paragraph::new(footer).wrap(Wrap { trim: true }), rows[3]);
}
