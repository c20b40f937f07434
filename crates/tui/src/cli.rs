use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::{Filter, SortOrder};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "tasklist",
    version,
    about = "A small keyboard-driven task list.",
    after_help = "Examples:\n  tasklist                 Launch the TUI (same as `tasklist tui`)\n  tasklist add Buy milk\n  tasklist list --filter active --sort alphabetical\n  tasklist toggle 01HZX\n  tasklist clear-completed"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Tracing filter used when RUST_LOG is unset (e.g. "info", "debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
    /// Add a task
    Add(AddArgs),
    /// Print tasks using the given filter and sort
    List(ListArgs),
    /// Flip a task between active and completed
    Toggle(IdArgs),
    /// Delete one or more tasks by id
    Delete(DeleteArgs),
    /// Remove every completed task
    ClearCompleted,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Task text; multiple words are joined with spaces
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

impl AddArgs {
    pub fn joined(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Which tasks to show
    #[arg(long, value_enum, default_value_t = Filter::All)]
    pub filter: Filter,

    /// Ordering of the listed tasks
    #[arg(long, value_enum, default_value_t = SortOrder::Newest)]
    pub sort: SortOrder,
}

#[derive(Args, Debug, Clone)]
pub struct IdArgs {
    /// Task id or a unique prefix of it
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// One or more task ids (or unique prefixes) to delete
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}
