//! Command implementations for the CLI interface.
//!
//! Every handler works against the `ProjectStore` constructed in `main`, so the
//! CLI and the TUI share one set of store semantics.

use std::io::Write;

use chrono::{Local, NaiveDate};
use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::info;

use crate::dates::format_deadline_relative;
use crate::error::DashResult;
use crate::listing::{filter_projects, paginate};
use crate::project::{Project, ProjectDraft};
use crate::route::Route;
use crate::store::ProjectStore;
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive dashboard.
    Ui {
        /// Screen to open on: /, /projects, /projects/new, /projects/<id>, /tasks, /help.
        #[arg(long, default_value = "/projects")]
        route: Route,
    },

    /// List projects, one page at a time.
    List {
        /// Case-insensitive text to match against any field.
        #[arg(long)]
        filter: Option<String>,
        /// Page to show (5 rows per page).
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show a single project.
    View {
        id: u64,
    },

    /// Add a new project.
    Add {
        /// Project name.
        name: String,
        /// Description.
        #[arg(long)]
        desc: String,
        /// Deadline: YYYY-MM-DD, "today", "tomorrow", "in Nd", "in Nw" or "eom".
        #[arg(long)]
        deadline: String,
        /// Status label.
        #[arg(long, default_value = "Not Started")]
        status: String,
        /// Percentage complete (clamped to 0-100).
        #[arg(long, default_value = "0")]
        progress: String,
    },

    /// Update fields on a project.
    Update {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        progress: Option<String>,
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Delete a project.
    Delete {
        id: u64,
    },

    /// Populate an empty store with the sample projects.
    Seed,

    /// Generate shell completions.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Run one command against the store.
pub fn execute(command: Commands, store: &mut ProjectStore) -> DashResult<()> {
    let today = Local::now().date_naive();
    let mut out = std::io::stdout().lock();

    match command {
        Commands::Ui { route } => {
            drop(out);
            run_tui(store, route)
        }
        Commands::List { filter, page } => cmd_list(&mut out, store, filter.as_deref().unwrap_or(""), page, today),
        Commands::View { id } => cmd_view(&mut out, store, id, today),
        Commands::Add {
            name,
            desc,
            deadline,
            status,
            progress,
        } => {
            let draft = ProjectDraft {
                id: store.next_id(),
                name,
                description: desc,
                status,
                progress,
                deadline,
            };
            cmd_add(&mut out, store, draft, today)
        }
        Commands::Update {
            id,
            name,
            desc,
            status,
            progress,
            deadline,
        } => {
            let changes = ProjectChanges {
                name,
                description: desc,
                status,
                progress,
                deadline,
            };
            cmd_update(&mut out, store, id, changes, today)
        }
        Commands::Delete { id } => cmd_delete(&mut out, store, id),
        Commands::Seed => cmd_seed(&mut out, store),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

/// Print one page of the filtered project table.
pub fn cmd_list(out: &mut impl Write, store: &mut ProjectStore, filter: &str, page: usize, today: NaiveDate) -> DashResult<()> {
    store.initialize();
    let matches = filter_projects(store.projects(), filter);
    let page = paginate(&matches, page);

    writeln!(
        out,
        "{:<5} {:<24} {:<12} {:>8} {:<11} {}",
        "ID", "Name", "Status", "Progress", "Deadline", "Due"
    )?;
    for p in page.items {
        writeln!(
            out,
            "{:<5} {:<24} {:<12} {:>7}% {:<11} {}",
            p.id,
            truncate(&p.name, 24),
            truncate(&p.status, 12),
            p.progress,
            p.deadline.to_string(),
            format_deadline_relative(p.deadline, today)
        )?;
    }
    writeln!(out, "{}  (page {}/{})", page.rows_label(), page.number, page.total_pages)?;
    Ok(())
}

/// Print a project's details, or an inline not-found notice.
pub fn cmd_view(out: &mut impl Write, store: &ProjectStore, id: u64, today: NaiveDate) -> DashResult<()> {
    let Some(p) = store.get(id) else {
        writeln!(out, "Project {id} not found. Run `pdash list` to see available projects.")?;
        return Ok(());
    };
    writeln!(out, "Project #{}: {}", p.id, p.name)?;
    writeln!(out, "Status:      {}", p.status)?;
    writeln!(out, "Progress:    {}%", p.progress)?;
    writeln!(out, "Deadline:    {} ({})", p.deadline, format_deadline_relative(p.deadline, today))?;
    writeln!(out, "Description: {}", p.description)?;
    Ok(())
}

/// Validate a draft and add it to the store.
pub fn cmd_add(out: &mut impl Write, store: &mut ProjectStore, draft: ProjectDraft, today: NaiveDate) -> DashResult<()> {
    let project = draft.into_project(today)?;
    let id = project.id;
    store.add(project);
    info!(id, "project added from cli");
    writeln!(out, "Added project {id}")?;
    Ok(())
}

/// Optional field overrides for `update`.
#[derive(Debug, Default)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub progress: Option<String>,
    pub deadline: Option<String>,
}

impl ProjectChanges {
    /// Overlay the changes onto `project` through the same validation the form uses.
    fn apply(self, project: &Project, today: NaiveDate) -> DashResult<Project> {
        let mut draft = ProjectDraft::from_project(project);
        if let Some(v) = self.name {
            draft.name = v;
        }
        if let Some(v) = self.description {
            draft.description = v;
        }
        if let Some(v) = self.status {
            draft.status = v;
        }
        if let Some(v) = self.progress {
            draft.progress = v;
        }
        if let Some(v) = self.deadline {
            draft.deadline = v;
        }
        draft.into_project(today)
    }
}

/// Apply field changes to an existing project.
pub fn cmd_update(out: &mut impl Write, store: &mut ProjectStore, id: u64, changes: ProjectChanges, today: NaiveDate) -> DashResult<()> {
    let Some(current) = store.get(id).cloned() else {
        writeln!(out, "No project with id {id}; nothing updated.")?;
        return Ok(());
    };
    let updated = changes.apply(&current, today)?;
    store.update(updated);
    writeln!(out, "Updated project {id}")?;
    Ok(())
}

/// Delete a project by id.
pub fn cmd_delete(out: &mut impl Write, store: &mut ProjectStore, id: u64) -> DashResult<()> {
    if store.delete(id) {
        writeln!(out, "Deleted project {id}")?;
    } else {
        writeln!(out, "No project with id {id}; nothing deleted.")?;
    }
    Ok(())
}

/// Seed an empty store.
pub fn cmd_seed(out: &mut impl Write, store: &mut ProjectStore) -> DashResult<()> {
    if store.initialize() {
        writeln!(out, "Seeded {} sample projects.", store.len())?;
    } else {
        writeln!(out, "Store already has {} project(s); seed skipped.", store.len())?;
    }
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
