use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Terminal project dashboard.
/// Data lives in ~/.pdash unless --data-dir or PDASH_DATA_DIR says otherwise.
#[derive(Parser)]
#[command(name = "pdash", version, about = "Project dashboard with a kanban task board")]
pub struct Cli {
    /// Directory holding the project store and log file.
    #[arg(long, global = true, env = "PDASH_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep everything in memory for this run; nothing is written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Commands,
}
