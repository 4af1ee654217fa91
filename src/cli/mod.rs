//! CLI argument definitions for tiller.

use clap::{Parser, Subcommand};

/// Tiller - a keyboard-driven to-do list for the terminal.
///
/// Running `tl` with no command lists all tasks.
#[derive(Parser, Debug)]
#[command(name = "tl")]
#[command(author, version, about = "A to-do list for the terminal", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Store data under <path> instead of the platform data directory.
    /// Can also be set via TL_DATA_DIR environment variable.
    #[arg(short = 'D', long = "data-dir", global = true, env = "TL_DATA_DIR")]
    pub data_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new task
    Add {
        /// Task text (leading/trailing whitespace is trimmed;
        /// blank text adds nothing)
        text: String,
    },

    /// Toggle a task's completion status
    Toggle {
        /// Task id, or any unique prefix of it
        id: String,
    },

    /// Replace a task's text
    Edit {
        /// Task id, or any unique prefix of it
        id: String,

        /// New text (empty or unchanged text leaves the task as-is)
        text: String,
    },

    /// Delete a task
    Delete {
        /// Task id, or any unique prefix of it
        id: String,
    },

    /// Remove all completed tasks
    Clear,

    /// List tasks
    List {
        /// Show only tasks with this status (all, active, completed)
        #[arg(short, long, default_value = "all")]
        filter: String,
    },

    /// Open the interactive TUI (requires 'tui' feature)
    #[cfg(feature = "tui")]
    Tui,
}
