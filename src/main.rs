//! # pdash - Project Dashboard
//!
//! A terminal dashboard for keeping track of a handful of projects, with a
//! kanban board for the tasks inside them.
//!
//! ## Key Features
//!
//! - **Project store**: every project lives in one JSON document under the data
//!   directory and is rewritten after each change
//! - **Searchable list**: case-insensitive filter across all columns, five rows per page
//! - **Create / edit form**: deadlines accept `today`, `tomorrow`, `in 3d`, `in 2w`,
//!   `eom` or an ISO date
//! - **Task board**: three status columns; cards are carried between them with the keyboard
//! - **Scriptable CLI**: list, view, add, update and delete without opening the TUI
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the dashboard on the project list
//! pdash ui
//!
//! # Jump straight to the task board
//! pdash ui --route /tasks
//!
//! # Add a project from the shell
//! pdash add "Docs Portal" --desc "Public API docs" --deadline "in 2w"
//!
//! # Filter the list
//! pdash list --filter progress
//! ```
//!
//! Data lives in `~/.pdash/` unless `--data-dir` or `PDASH_DATA_DIR` says
//! otherwise; `--ephemeral` keeps everything in memory for the session.
//! Set `PDASH_LOG` (for example `pdash=debug`) to change log verbosity.

use std::path::Path;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod board;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod dates;
pub mod error;
pub mod fields;
pub mod listing;
pub mod project;
pub mod route;
pub mod storage;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod board_view;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod project_form;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::Commands;
use config::Config;
use store::ProjectStore;

/// Initialize tracing.
///
/// The TUI owns the terminal, so while it runs logs go to `log_file`
/// without ANSI codes. Everything else logs to stderr.
fn init_tracing(log_file: Option<&Path>) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_env("PDASH_LOG")
        .unwrap_or_else(|_| "pdash=info".into());

    if let Some(path) = log_file {
        match std::fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(std::sync::Mutex::new(file))
                            .with_ansi(false),
                    )
                    .init();
            }
            Err(e) => {
                // No subscriber: logging to the terminal would corrupt the UI.
                eprintln!("Logging disabled, cannot open {}: {}", path.display(), e);
            }
        }
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    let cli = Cli::parse();

    let config = match Config::resolve(cli.data_dir.clone(), cli.ephemeral) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let log_file = match cli.command {
        Commands::Ui { .. } => Some(config.log_file.as_path()),
        _ => None,
    };
    init_tracing(log_file);

    let mut store = ProjectStore::open(config.open_storage());

    if let Err(e) = cmd::execute(cli.command, &mut store) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
