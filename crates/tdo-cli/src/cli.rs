use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tdo_core::error::CoreError;
use tdo_core::filter::DueFilter;
use tdo_core::models::Priority;

/// A small command-line client for Todoist
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON preferences file (default: ~/.todoist-cli.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// 1Password reference for the Todoist API token
    #[arg(long, global = true, value_name = "REF")]
    pub token_path: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Runs `list` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// List and filter your tasks
    List(ListCommand),
    /// Create a new task with optional attributes and subtasks
    Add(AddCommand),
    /// Mark a task as complete
    Complete(CompleteCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// List all your projects
    Projects,
    /// List all your labels
    Labels,
    /// Create a Task Reset checklist with predefined subtasks
    #[command(alias = "create_reset_task")]
    Reset,
    /// Create a task with positional subtasks (legacy form of `add`)
    #[command(hide = true)]
    Create(LegacyCreateCommand),
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct ListCommand {
    /// Only tasks in this project (by name)
    #[arg(short, long)]
    pub project: Option<String>,
    /// Only tasks with this label
    #[arg(short, long)]
    pub label: Option<String>,
    /// Only tasks with this priority (1=lowest, 4=highest)
    #[arg(short = 'P', long)]
    pub priority: Option<Priority>,
    /// Only tasks due on this date (today, tomorrow, overdue, YYYY-MM-DD, ...)
    #[arg(short, long, value_parser = parse_due_filter)]
    pub due: Option<DueFilter>,
}

/// Due expressions are resolved while parsing, so a bad one is a usage error.
fn parse_due_filter(input: &str) -> Result<DueFilter, CoreError> {
    DueFilter::parse(input, Local::now())
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct AddCommand {
    /// The task content
    pub content: String,
    /// A longer description
    #[arg(short = 'D', long)]
    pub description: Option<String>,
    /// Project name
    #[arg(short, long)]
    pub project: Option<String>,
    /// Priority (1=lowest, 4=highest)
    #[arg(short = 'P', long)]
    pub priority: Option<Priority>,
    /// Due date in Todoist's own syntax (today, tomorrow, every monday, 2025-12-31)
    #[arg(short, long)]
    pub due: Option<String>,
    /// Add a label (repeatable)
    #[arg(short, long = "label")]
    pub labels: Vec<String>,
    /// Add a subtask (repeatable)
    #[arg(short, long = "subtask")]
    pub subtasks: Vec<String>,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct CompleteCommand {
    /// ID of the task to complete
    pub id: String,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct DeleteCommand {
    /// ID of the task to delete
    pub id: String,
    /// Skip confirmation
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct LegacyCreateCommand {
    /// The task content
    pub content: String,
    /// Subtasks to create under it
    pub subtasks: Vec<String>,
}

impl From<LegacyCreateCommand> for AddCommand {
    fn from(legacy: LegacyCreateCommand) -> Self {
        AddCommand {
            content: legacy.content,
            subtasks: legacy.subtasks,
            ..Default::default()
        }
    }
}

impl Cli {
    /// The command to run, with legacy forms rewritten to their modern ones.
    pub fn resolved_command(&self) -> Commands {
        match self.command.clone() {
            None => Commands::List(ListCommand::default()),
            Some(Commands::Create(legacy)) => Commands::Add(legacy.into()),
            Some(command) => command,
        }
    }
}
