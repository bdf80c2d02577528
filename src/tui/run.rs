//! Terminal user interface entry point and setup.

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::info;

use crate::error::DashResult;
use crate::route::Route;
use crate::store::ProjectStore;
use crate::tui::app::App;

/// Initialise and run the dashboard starting at `route`. The terminal is
/// restored even when the event loop fails.
pub fn run_tui(store: &mut ProjectStore, route: Route) -> DashResult<()> {
    info!(%route, "Starting dashboard");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, route);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    info!("Dashboard closed");
    Ok(())
}
