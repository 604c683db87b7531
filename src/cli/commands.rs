use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::ThemeChoice;

#[derive(Parser)]
#[command(name = "kb", about = concat!("kb v", env!("CARGO_PKG_VERSION"), " - a kanban board for the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Load boards from a JSON seed file instead of the built-in demo
    #[arg(long, global = true, value_name = "FILE")]
    pub seed: Option<PathBuf>,

    /// Read configuration from this file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start in this palette (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub theme: Option<ThemeChoice>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List boards with column and task counts
    Boards,
    /// Print one board's columns and tasks
    Show(ShowArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// Board name (case-insensitive); defaults to the first board
    pub board: Option<String>,
}
