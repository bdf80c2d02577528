//! Main application logic for the terminal user interface.
//!
//! `App` owns the current route, a bounded back-history and the per-screen
//! state (list filter and page, the open project form, the task board). It
//! borrows the project store for its whole lifetime; every change the user
//! makes goes through the store so it is persisted immediately.

use std::io;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame, Terminal,
};
use tracing::{debug, info};

use crate::board::TaskBoard;
use crate::dates::format_deadline_relative;
use crate::fields::{PROJECT_COMPLETED, PROJECT_IN_PROGRESS};
use crate::listing::{filter_projects, paginate, ListState};
use crate::project::Project;
use crate::route::Route;
use crate::store::ProjectStore;
use crate::tui::{
    board_view::{BoardOutcome, BoardView},
    colors::{project_status_color, GOLD, TEAL},
    enums::{Confirm, InputMode},
    project_form::{
        FormMode, ProjectForm, DEADLINE_ORDER, DESCRIPTION_ORDER, NAME_ORDER, PROGRESS_ORDER,
        STATUS_ORDER,
    },
    utils::render_confirm,
};

/// Shortcuts offered on the dashboard screen.
const HOME_LINKS: [Route; 4] = [Route::Projects, Route::NewProject, Route::Tasks, Route::Help];

/// Mean progress across `projects`, 0 for an empty list. Progress is not
/// bounded in the store, so the sum is taken wide.
fn average_progress(projects: &[Project]) -> i64 {
    if projects.is_empty() {
        return 0;
    }
    let total: i128 = projects.iter().map(|p| i128::from(p.progress)).sum();
    (total / projects.len() as i128) as i64
}

/// Main application state for the terminal user interface.
pub struct App<'a> {
    store: &'a mut ProjectStore,
    route: Route,
    history: Vec<Route>,
    max_history: usize,
    list: ListState,
    table_state: TableState,
    input_mode: InputMode,
    page_input: String,
    form: Option<ProjectForm>,
    board: Option<BoardView>,
    confirm: Option<Confirm>,
    home_index: usize,
    status_message: String,
}

impl<'a> App<'a> {
    /// Create the app over `store` and enter `route`.
    pub fn new(store: &'a mut ProjectStore, route: Route) -> Self {
        let mut app = App {
            store,
            route,
            history: Vec::new(),
            max_history: 10,
            list: ListState::default(),
            table_state: TableState::default(),
            input_mode: InputMode::None,
            page_input: String::new(),
            form: None,
            board: None,
            confirm: None,
            home_index: 0,
            status_message: String::new(),
        };
        app.enter();
        app
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn history(&self) -> &[Route] {
        &self.history
    }

    pub fn list(&self) -> &ListState {
        &self.list
    }

    pub fn board(&self) -> Option<&BoardView> {
        self.board.as_ref()
    }

    pub fn form(&self) -> Option<&ProjectForm> {
        self.form.as_ref()
    }

    pub fn store(&self) -> &ProjectStore {
        &*self.store
    }

    /// Move to `to`, remembering the current route.
    pub fn navigate(&mut self, to: Route) {
        if to == self.route {
            return;
        }
        self.history.push(self.route);
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }
        debug!(from = %self.route, to = %to, "navigate");
        self.leave();
        self.route = to;
        self.enter();
    }

    /// Return to the previous route. False when there is nowhere to go.
    pub fn go_back(&mut self) -> bool {
        let Some(previous) = self.history.pop() else {
            return false;
        };
        debug!(from = %self.route, to = %previous, "back");
        self.leave();
        self.route = previous;
        self.enter();
        true
    }

    /// Go back, or replace the current route with `fallback` when the
    /// history is empty.
    fn retreat(&mut self, fallback: Route) {
        if !self.go_back() {
            self.leave();
            self.route = fallback;
            self.enter();
        }
    }

    /// Tear down state owned by the current route.
    fn leave(&mut self) {
        match self.route {
            Route::NewProject | Route::EditProject(_) => {
                self.form = None;
                self.store.select(None);
            }
            Route::Tasks => self.board = None,
            _ => {}
        }
        self.input_mode = InputMode::None;
        self.page_input.clear();
        self.confirm = None;
    }

    /// Set up state for the current route.
    fn enter(&mut self) {
        match self.route {
            Route::Projects => {
                if self.store.initialize() {
                    self.status_message = "Loaded sample projects".to_string();
                }
                let count = self.filtered_count();
                self.list.clamp(count);
                self.clamp_row();
            }
            Route::NewProject => {
                self.form = Some(ProjectForm::for_store(self.store));
                self.input_mode = InputMode::Text;
            }
            Route::EditProject(id) => {
                let project = self.store.get(id).cloned();
                if project.is_some() {
                    self.store.select(project);
                    self.form = Some(ProjectForm::for_store(self.store));
                    self.input_mode = InputMode::Text;
                }
            }
            Route::Tasks => self.board = Some(BoardView::new(TaskBoard::default())),
            Route::Home | Route::ProjectDetails(_) | Route::Help => {}
        }
    }

    fn filtered_count(&self) -> usize {
        filter_projects(self.store.projects(), self.list.filter()).len()
    }

    /// Ids of the rows on the current page.
    fn visible_ids(&self) -> Vec<u64> {
        let matches = filter_projects(self.store.projects(), self.list.filter());
        paginate(&matches, self.list.page())
            .items
            .iter()
            .map(|p| p.id)
            .collect()
    }

    fn clamp_row(&mut self) {
        let rows = self.visible_ids().len();
        let row = match self.table_state.selected() {
            _ if rows == 0 => None,
            Some(row) => Some(row.min(rows - 1)),
            None => Some(0),
        };
        self.table_state.select(row);
    }

    fn selected_project_id(&self) -> Option<u64> {
        let row = self.table_state.selected().unwrap_or(0);
        self.visible_ids().get(row).copied()
    }

    fn ask_delete(&mut self, id: u64) {
        if let Some(project) = self.store.get(id) {
            self.confirm = Some(Confirm::DeleteProject {
                id,
                name: project.name.clone(),
            });
        }
    }

    fn handle_confirm(&mut self, key: KeyEvent, confirm: Confirm) {
        let Confirm::DeleteProject { id, name } = confirm else {
            return;
        };
        if !matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            self.status_message = "Delete cancelled".to_string();
            return;
        }
        if self.store.delete(id) {
            info!(id, "Deleted project from dashboard");
            self.status_message = format!("Deleted \"{name}\"");
        } else {
            self.status_message = format!("Project #{id} was already gone");
        }

        let refers_to_deleted =
            |route: &Route| matches!(route, Route::ProjectDetails(x) | Route::EditProject(x) if *x == id);
        self.history.retain(|route| !refers_to_deleted(route));
        if refers_to_deleted(&self.route) {
            self.retreat(Route::Projects);
        } else if self.route == Route::Projects {
            let count = self.filtered_count();
            self.list.clamp(count);
            self.clamp_row();
        }
    }

    /// Handle one key press. Returns true when the app should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        self.status_message.clear();

        if let Some(confirm) = self.confirm.take() {
            self.handle_confirm(key, confirm);
            return false;
        }

        match self.route {
            Route::Home => self.handle_home_key(key),
            Route::Projects => self.handle_list_key(key),
            Route::ProjectDetails(id) => self.handle_details_key(key, id),
            Route::NewProject | Route::EditProject(_) => self.handle_form_key(key),
            Route::Tasks => self.handle_board_key(key),
            Route::Help => self.handle_global_key(key),
        }
    }

    /// Keys available on every screen that is not capturing text.
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.navigate(Route::NAV[index]);
            }
            KeyCode::Char('?') | KeyCode::F(1) => self.navigate(Route::Help),
            KeyCode::Esc | KeyCode::Backspace => {
                if !self.go_back() && self.route != Route::Home {
                    self.retreat(Route::Home);
                }
            }
            _ => {}
        }
        false
    }

    fn handle_home_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.home_index = (self.home_index + HOME_LINKS.len() - 1) % HOME_LINKS.len();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.home_index = (self.home_index + 1) % HOME_LINKS.len();
            }
            KeyCode::Enter => self.navigate(HOME_LINKS[self.home_index]),
            _ => return self.handle_global_key(key),
        }
        false
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> bool {
        if self.input_mode == InputMode::Text {
            match key.code {
                KeyCode::Esc => {
                    self.list.set_filter("");
                    self.input_mode = InputMode::None;
                }
                KeyCode::Enter => self.input_mode = InputMode::None,
                KeyCode::Backspace => self.list.pop_filter_char(),
                KeyCode::Char(c) => self.list.push_filter_char(c),
                _ => return false,
            }
            self.table_state.select(Some(0));
            self.clamp_row();
            return false;
        }

        let count = self.filtered_count();
        if self.input_mode == InputMode::Page {
            match key.code {
                KeyCode::Esc => {
                    self.page_input.clear();
                    self.input_mode = InputMode::None;
                }
                KeyCode::Enter => {
                    if let Ok(page) = self.page_input.parse::<usize>() {
                        self.list.set_page(page, count);
                        self.table_state.select(Some(0));
                        self.clamp_row();
                    }
                    self.page_input.clear();
                    self.input_mode = InputMode::None;
                }
                KeyCode::Backspace => {
                    self.page_input.pop();
                }
                KeyCode::Char(c) if c.is_ascii_digit() && self.page_input.len() < 6 => {
                    self.page_input.push(c);
                }
                _ => {}
            }
            return false;
        }

        match key.code {
            KeyCode::Char('/') => self.input_mode = InputMode::Text,
            KeyCode::Char('g') => {
                self.page_input.clear();
                self.input_mode = InputMode::Page;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let row = self.table_state.selected().unwrap_or(0);
                self.table_state.select(Some(row.saturating_sub(1)));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let row = self.table_state.selected().unwrap_or(0);
                self.table_state.select(Some(row + 1));
                self.clamp_row();
            }
            KeyCode::Right | KeyCode::PageDown | KeyCode::Char(']') => {
                self.list.next_page(count);
                self.table_state.select(Some(0));
                self.clamp_row();
            }
            KeyCode::Left | KeyCode::PageUp | KeyCode::Char('[') => {
                self.list.prev_page(count);
                self.table_state.select(Some(0));
                self.clamp_row();
            }
            KeyCode::Enter => {
                if let Some(id) = self.selected_project_id() {
                    self.navigate(Route::ProjectDetails(id));
                }
            }
            KeyCode::Char('n') => {
                self.store.select(None);
                self.navigate(Route::NewProject);
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_project_id() {
                    self.navigate(Route::EditProject(id));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_project_id() {
                    self.ask_delete(id);
                }
            }
            _ => return self.handle_global_key(key),
        }
        false
    }

    fn handle_details_key(&mut self, key: KeyEvent, id: u64) -> bool {
        let exists = self.store.get(id).is_some();
        match key.code {
            KeyCode::Char('e') if exists => self.navigate(Route::EditProject(id)),
            KeyCode::Char('d') | KeyCode::Delete if exists => self.ask_delete(id),
            KeyCode::Esc => self.retreat(Route::Projects),
            _ => return self.handle_global_key(key),
        }
        false
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> bool {
        let Some(form) = self.form.as_mut() else {
            // Edit route for a record that does not exist.
            return match key.code {
                KeyCode::Esc => {
                    self.retreat(Route::Projects);
                    false
                }
                _ => self.handle_global_key(key),
            };
        };
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => {
                self.store.select(None);
                self.retreat(Route::Projects);
            }
            KeyCode::Enter => match form.submit(self.store, Local::now().date_naive()) {
                Ok(mode) => {
                    let verb = match mode {
                        FormMode::Create => "Created",
                        FormMode::Edit => "Saved",
                    };
                    let name = form.name.value.trim().to_string();
                    self.retreat(Route::Projects);
                    self.status_message = format!("{verb} \"{name}\"");
                }
                Err(e) => self.status_message = e.to_string(),
            },
            KeyCode::Char('d') if ctrl => {
                if form.mode == FormMode::Edit {
                    let id = form.id;
                    self.ask_delete(id);
                }
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left if ctrl && form.current_field == STATUS_ORDER => form.cycle_status(false),
            KeyCode::Right if ctrl && form.current_field == STATUS_ORDER => form.cycle_status(true),
            KeyCode::Left => form.handle_left_right(false),
            KeyCode::Right => form.handle_left_right(true),
            KeyCode::Home => form.handle_home_end(false),
            KeyCode::End => form.handle_home_end(true),
            KeyCode::Backspace => form.handle_backspace(),
            KeyCode::Delete => form.handle_delete(),
            KeyCode::Char(c) => form.handle_char(c),
            _ => {}
        }
        false
    }

    fn handle_board_key(&mut self, key: KeyEvent) -> bool {
        let Some(board) = self.board.as_mut() else {
            return self.handle_global_key(key);
        };
        match board.handle_key(key) {
            BoardOutcome::Consumed => false,
            BoardOutcome::Leave => {
                self.retreat(Route::Home);
                false
            }
            BoardOutcome::Ignored => self.handle_global_key(key),
        }
    }

    /// Render the whole screen.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        self.render_nav(f, chunks[0]);
        match self.route {
            Route::Home => self.render_home(f, chunks[1]),
            Route::Projects => self.render_list(f, chunks[1]),
            Route::ProjectDetails(id) => self.render_details(f, chunks[1], id),
            Route::NewProject | Route::EditProject(_) => self.render_form(f, chunks[1]),
            Route::Tasks => {
                if let Some(board) = &self.board {
                    board.render(f, chunks[1]);
                }
            }
            Route::Help => render_help(f, chunks[1]),
        }
        self.render_status_bar(f, chunks[2]);

        if let Some(confirm) = &self.confirm {
            render_confirm(f, confirm);
        }
    }

    fn render_nav(&self, f: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Route::NAV
            .iter()
            .enumerate()
            .map(|(i, r)| Line::from(format!("{} {}", i + 1, r.label())))
            .collect();
        let selected = Route::NAV
            .iter()
            .position(|r| *r == self.route.section())
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("PROJECT DASHBOARD", Style::default().add_modifier(Modifier::BOLD))),
            )
            .highlight_style(Style::default().fg(Color::Black).bg(GOLD).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, area);
    }

    fn render_home(&self, f: &mut Frame, area: Rect) {
        let projects = self.store.projects();
        let count_with = |status: &str| {
            projects
                .iter()
                .filter(|p| p.status.eq_ignore_ascii_case(status))
                .count()
        };
        let average = average_progress(projects);

        let mut lines = vec![
            Line::from(Span::styled("Overview", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from(format!("Projects:          {}", projects.len())),
            Line::from(format!("In progress:       {}", count_with(PROJECT_IN_PROGRESS))),
            Line::from(format!("Completed:         {}", count_with(PROJECT_COMPLETED))),
            Line::from(format!("Average progress:  {average}%")),
            Line::from(""),
            Line::from(Span::styled("Go to", Style::default().add_modifier(Modifier::BOLD))),
        ];
        for (i, route) in HOME_LINKS.iter().enumerate() {
            let style = if i == self.home_index {
                Style::default().bg(Color::Gray).fg(Color::Black)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(format!("  {}  ({})", route.label(), route), style)));
        }

        let widget = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Dashboard"))
            .wrap(Wrap { trim: false });
        f.render_widget(widget, area);
    }

    fn render_list(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        let filter_style = if self.input_mode == InputMode::Text {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let filter = Paragraph::new(self.list.filter()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Filter (/)")
                .border_style(filter_style),
        );
        f.render_widget(filter, chunks[0]);
        if self.input_mode == InputMode::Text {
            let x = chunks[0].x + 1 + self.list.filter().chars().count() as u16;
            f.set_cursor_position((x.min(chunks[0].right().saturating_sub(2)), chunks[0].y + 1));
        }

        let today = Local::now().date_naive();
        let matches = filter_projects(self.store.projects(), self.list.filter());
        self.list.clamp(matches.len());
        let page = paginate(&matches, self.list.page());
        let rows_label = page.rows_label();
        let page_label = format!("Page {} of {}", page.number, page.total_pages);

        let rows: Vec<Row> = page
            .items
            .iter()
            .map(|project| {
                Row::new(vec![
                    Cell::from(project.id.to_string()),
                    Cell::from(project.name.clone()),
                    Cell::from(project.status.clone())
                        .style(Style::default().fg(project_status_color(&project.status))),
                    Cell::from(format!("{}%", project.progress)),
                    Cell::from(format!(
                        "{} ({})",
                        project.deadline,
                        format_deadline_relative(project.deadline, today)
                    )),
                    Cell::from(project.description.clone()),
                ])
            })
            .collect();

        let header = Row::new(
            ["ID", "Name", "Status", "Progress", "Deadline", "Description"]
                .iter()
                .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD))),
        )
        .style(Style::default().bg(TEAL).fg(Color::White))
        .height(1);

        let widths = [
            Constraint::Length(4),
            Constraint::Length(24),
            Constraint::Length(12),
            Constraint::Length(9),
            Constraint::Length(24),
            Constraint::Min(20),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Projects ({}/{})", matches.len(), self.store.len())),
            )
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");
        f.render_stateful_widget(table, chunks[1], &mut self.table_state);

        let footer = if self.input_mode == InputMode::Page {
            Paragraph::new(format!("Go to page (1-{}): {}_", page.total_pages, self.page_input))
                .style(Style::default().fg(GOLD))
        } else {
            Paragraph::new(format!("{rows_label}  |  {page_label}"))
        }
        .alignment(Alignment::Right);
        f.render_widget(footer, chunks[2]);
    }

    fn render_details(&self, f: &mut Frame, area: Rect, id: u64) {
        let Some(project) = self.store.get(id) else {
            let message = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("Project #{id} not found."),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Press Esc to return to the project list."),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Project Details"));
            f.render_widget(message, area);
            return;
        };

        let today = Local::now().date_naive();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(area);

        let lines = vec![
            Line::from(Span::styled(
                format!("Project #{}: {}", project.id, project.name),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("Status:    "),
                Span::styled(
                    project.status.clone(),
                    Style::default().fg(project_status_color(&project.status)),
                ),
            ]),
            Line::from(format!(
                "Deadline:  {} ({})",
                project.deadline,
                format_deadline_relative(project.deadline, today)
            )),
            Line::from(""),
            Line::from("Description:"),
            Line::from(project.description.clone()),
        ];
        let details = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Project Details"))
            .wrap(Wrap { trim: true });
        f.render_widget(details, chunks[0]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(TEAL))
            .percent(project.progress.clamp(0, 100) as u16);
        f.render_widget(gauge, chunks[1]);
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let Some(form) = &self.form else {
            let message = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Nothing to edit: that project does not exist.",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from("Press Esc to return to the project list."),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Edit Project"));
            f.render_widget(message, area);
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(form.title())
            .border_style(Style::default().fg(TEAL).add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(0)])
            .split(inner);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(outer[0]);
        let rows = |column: Rect| {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Length(3)])
                .split(column)
        };
        let left = rows(columns[0]);
        let right = rows(columns[1]);

        let slots = [
            (NAME_ORDER, left[0]),
            (STATUS_ORDER, left[1]),
            (PROGRESS_ORDER, left[2]),
            (DESCRIPTION_ORDER, right[0]),
            (DEADLINE_ORDER, right[1]),
        ];
        let fields = form.fields();
        for (order, slot) in slots {
            let (label, field) = fields[order];
            let border_style = if field.active {
                Style::default().fg(GOLD)
            } else {
                Style::default()
            };
            let widget = Paragraph::new(field.value.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{label} *"))
                    .border_style(border_style),
            );
            f.render_widget(widget, slot);
            if field.active {
                let x = slot.x + 1 + field.cursor as u16;
                f.set_cursor_position((x.min(slot.right().saturating_sub(2)), slot.y + 1));
            }
        }

        let mut hints = vec![Line::from(
            "Tab/↑/↓: Field | Ctrl+←/→ on Status: Preset | Enter: Save | Esc: Cancel",
        )];
        if form.mode == FormMode::Edit {
            hints.push(Line::from("Ctrl+D: Delete this project"));
        }
        hints.push(Line::from("Deadline accepts YYYY-MM-DD, today, tomorrow, in 3d, in 2w, eom"));
        if let Some(error) = &form.error {
            hints.push(Line::from(""));
            hints.push(Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red))));
        }
        f.render_widget(Paragraph::new(hints).wrap(Wrap { trim: true }), outer[1]);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            let hint = match self.route {
                Route::Home => "↑/↓: Choose | Enter: Open",
                Route::Projects if self.input_mode == InputMode::Text => {
                    "Type to filter | Enter: Apply | Esc: Clear"
                }
                Route::Projects if self.input_mode == InputMode::Page => {
                    "Type a page number | Enter: Go | Esc: Cancel"
                }
                Route::Projects => {
                    "Enter: View | n: New | e: Edit | d: Delete | ←/→: Page | g: Go to page | /: Filter"
                }
                Route::ProjectDetails(_) => "e: Edit | d: Delete | Esc: Back",
                Route::NewProject | Route::EditProject(_) => "Editing project",
                Route::Tasks => match self.board.as_ref() {
                    Some(board) if board.is_editing() => "Editing task",
                    Some(board) if board.is_dragging() => "Carrying a card",
                    _ => "Task board",
                },
                Route::Help => "Esc: Back",
            };
            format!("{} | {hint} | 1-4: Navigate | q: Quit", self.route)
        };
        let status = Paragraph::new(text)
            .style(Style::default().bg(TEAL).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main event loop.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

fn render_help(f: &mut Frame, area: Rect) {
    let heading = |text: &'static str| {
        Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
    };
    let lines = vec![
        heading("Everywhere"),
        Line::from("  1-4        Dashboard, Projects, Task Board, Help"),
        Line::from("  Esc        Back"),
        Line::from("  q, Ctrl+C  Quit"),
        Line::from(""),
        heading("Projects"),
        Line::from("  /          Filter by any column (Enter applies, Esc clears)"),
        Line::from("  ←/→        Previous / next page"),
        Line::from("  g          Go to page number"),
        Line::from("  Enter      Open details"),
        Line::from("  n, e, d    New, edit, delete"),
        Line::from(""),
        heading("Project form"),
        Line::from("  Tab        Next field"),
        Line::from("  Ctrl+←/→   Cycle status presets"),
        Line::from("  Enter      Save, Esc cancels"),
        Line::from(""),
        heading("Task board"),
        Line::from("  Space      Pick up / drop the selected card"),
        Line::from("  ←/→        Change column (carries a picked-up card)"),
        Line::from("  n, e, d    New, edit, delete card"),
    ];
    let help = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Help Center"))
        .wrap(Wrap { trim: false });
    f.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::TaskStatus;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    fn empty_store() -> ProjectStore {
        ProjectStore::open(Box::new(MemoryStorage::new()))
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App, c: char) -> bool {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn extra_project(id: u64) -> Project {
        Project {
            id,
            name: format!("Extra {id}"),
            description: "Backlog item".to_string(),
            status: "Not Started".to_string(),
            progress: 0,
            deadline: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_entering_projects_seeds_empty_store() {
        let mut store = empty_store();
        let app = App::new(&mut store, Route::Projects);
        assert_eq!(app.store().len(), 3);
        assert_eq!(app.route(), Route::Projects);
    }

    #[test]
    fn test_create_project_flow() {
        let mut store = empty_store();
        let mut app = App::new(&mut store, Route::Projects);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.route(), Route::NewProject);
        type_text(&mut app, "Docs Portal");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "5");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Public docs");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "2030-01-01");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.route(), Route::Projects);
        assert_eq!(app.store().len(), 4);
        let created = app.store().get(4).unwrap();
        assert_eq!(created.name, "Docs Portal");
        assert_eq!(created.status, "Not Started");
        assert!(app.store().selected().is_none());
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let mut store = empty_store();
        let mut app = App::new(&mut store, Route::Projects);
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "No details");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.route(), Route::NewProject);
        assert!(app.form().unwrap().error.is_some());
        assert_eq!(app.store().len(), 3);
    }

    #[test]
    fn test_edit_selects_record_and_cancel_clears_it() {
        let mut store = empty_store();
        let mut app = App::new(&mut store, Route::Projects);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route(), Route::ProjectDetails(1));
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.route(), Route::EditProject(1));
        assert_eq!(app.store().selected().map(|p| p.id), Some(1));
        assert_eq!(app.form().unwrap().mode, FormMode::Edit);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route(), Route::ProjectDetails(1));
        assert!(app.store().selected().is_none());
    }

    #[test]
    fn test_edit_saves_and_returns_to_details() {
        let mut store = empty_store();
        let mut app = App::new(&mut store, Route::Projects);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('e'));

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "90");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.route(), Route::ProjectDetails(1));
        assert_eq!(app.store().get(1).unwrap().progress, 90);
        assert_eq!(app.store().len(), 3);
    }

    #[test]
    fn test_status_presets_cycle_with_ctrl_arrows() {
        let mut store = empty_store();
        let mut app = App::new(&mut store, Route::NewProject);
        press(&mut app, KeyCode::Tab);
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL));
        assert_eq!(app.form().unwrap().status.value, "In Progress");
    }

    #[test]
    fn test_filter_typing_resets_page_and_captures_keys() {
        let mut store = empty_store();
        store.initialize();
        for id in 4..=12 {
            store.add(extra_project(id));
        }
        let mut app = App::new(&mut store, Route::Projects);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.list().page(), 3);

        press(&mut app, KeyCode::Char('/'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.list().filter(), "q");
        assert_eq!(app.list().page(), 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.list().filter(), "");
        assert_eq!(app.route(), Route::Projects);
    }

    #[test]
    fn test_jump_to_page_is_clamped() {
        let mut store = empty_store();
        store.initialize();
        for id in 4..=12 {
            store.add(extra_project(id));
        }
        let mut app = App::new(&mut store, Route::Projects);

        press(&mut app, KeyCode::Char('g'));
        type_text(&mut app, "2q");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.list().page(), 2);
        assert_eq!(app.route(), Route::Projects);

        press(&mut app, KeyCode::Char('g'));
        type_text(&mut app, "99");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.list().page(), 3);

        press(&mut app, KeyCode::Char('g'));
        type_text(&mut app, "0");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.list().page(), 1);

        press(&mut app, KeyCode::Char('g'));
        type_text(&mut app, "3");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.list().page(), 1);
        assert_eq!(app.route(), Route::Projects);
    }

    #[test]
    fn test_average_progress_does_not_overflow() {
        let mut big = extra_project(1);
        big.progress = i64::MAX;
        let mut also_big = extra_project(2);
        also_big.progress = i64::MAX;
        assert_eq!(average_progress(&[big, also_big]), i64::MAX);
        assert_eq!(average_progress(&[]), 0);

        let mut store = empty_store();
        store.initialize();
        store.update(Project {
            progress: i64::MAX,
            ..store.get(1).cloned().unwrap()
        });
        store.update(Project {
            progress: i64::MAX,
            ..store.get(2).cloned().unwrap()
        });
        let mut app = App::new(&mut store, Route::Home);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
    }

    #[test]
    fn test_delete_from_list_needs_confirmation() {
        let mut store = empty_store();
        let mut app = App::new(&mut store, Route::Projects);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.store().len(), 3);
        assert_eq!(app.route(), Route::Projects);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.store().len(), 2);
        assert!(app.store().get(1).is_none());
    }

    #[test]
    fn test_delete_from_details_forgets_the_record() {
        let mut store = empty_store();
        let mut app = App::new(&mut store, Route::Projects);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));

        assert_eq!(app.route(), Route::Projects);
        assert!(!app.history().contains(&Route::ProjectDetails(1)));
        assert!(app.store().get(1).is_none());
    }

    #[test]
    fn test_delete_from_edit_form() {
        let mut store = empty_store();
        let mut app = App::new(&mut store, Route::Projects);
        press(&mut app, KeyCode::Char('e'));
        ctrl(&mut app, 'd');
        press(&mut app, KeyCode::Char('y'));

        assert_eq!(app.route(), Route::Projects);
        assert!(app.store().get(1).is_none());
        assert!(app.store().selected().is_none());
    }

    #[test]
    fn test_missing_record_offers_a_way_out() {
        let mut store = empty_store();
        store.initialize();
        {
            let mut app = App::new(&mut store, Route::ProjectDetails(99));
            press(&mut app, KeyCode::Char('e'));
            assert_eq!(app.route(), Route::ProjectDetails(99));
            press(&mut app, KeyCode::Esc);
            assert_eq!(app.route(), Route::Projects);
        }

        let mut app = App::new(&mut store, Route::EditProject(99));
        assert!(app.form().is_none());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route(), Route::Projects);
    }

    #[test]
    fn test_navbar_and_bounded_history() {
        let mut store = empty_store();
        let mut app = App::new(&mut store, Route::Home);
        for _ in 0..8 {
            press(&mut app, KeyCode::Char('2'));
            press(&mut app, KeyCode::Char('4'));
        }
        assert_eq!(app.route(), Route::Help);
        assert_eq!(app.history().len(), 10);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route(), Route::Projects);
    }

    #[test]
    fn test_board_state_is_discarded_on_leave() {
        let mut store = empty_store();
        let mut app = App::new(&mut store, Route::Home);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.route(), Route::Tasks);

        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char(' '));
        let moved = app.board().unwrap().board().get("3").unwrap().status;
        assert_eq!(moved, TaskStatus::InProgress);

        press(&mut app, KeyCode::Char('2'));
        assert!(app.board().is_none());
        press(&mut app, KeyCode::Char('3'));
        let fresh = app.board().unwrap().board().get("3").unwrap().status;
        assert_eq!(fresh, TaskStatus::ToDo);
    }

    #[test]
    fn test_home_links() {
        let mut store = empty_store();
        let mut app = App::new(&mut store, Route::Home);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.route(), Route::NewProject);
    }

    #[test]
    fn test_quit_keys() {
        let mut store = empty_store();
        let mut app = App::new(&mut store, Route::Projects);
        assert!(ctrl(&mut app, 'c'));
        assert!(press(&mut app, KeyCode::Char('q')));

        press(&mut app, KeyCode::Char('n'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(ctrl(&mut app, 'c'));
    }

    #[test]
    fn test_every_screen_renders() {
        let mut store = empty_store();
        let mut app = App::new(&mut store, Route::Home);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let routes = [
            Route::Projects,
            Route::ProjectDetails(1),
            Route::ProjectDetails(42),
            Route::EditProject(1),
            Route::NewProject,
            Route::Tasks,
            Route::Help,
            Route::Home,
        ];
        for route in routes {
            app.navigate(route);
            terminal.draw(|f| app.render(f)).unwrap();
        }
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('d'));
        terminal.draw(|f| app.render(f)).unwrap();
    }
}
