use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::models::Task;
use crate::storage::{Storage, StorageError};
use crate::store::TaskStore;

#[derive(Parser)]
#[command(name = "taskline")]
#[command(about = "Chat-style task tracker for the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config and save file)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive session (default if no subcommand)
    Chat,
    /// Quickly add a todo and exit
    AddTodo {
        /// Task description
        description: String,
    },
    /// Quickly add a deadline and exit
    AddDeadline {
        /// Task description
        description: String,
        /// Due date (free text)
        #[arg(long)]
        by: String,
    },
    /// Quickly add an event and exit
    AddEvent {
        /// Task description
        description: String,
        /// Start date (free text)
        #[arg(long)]
        from: String,
        /// End date (free text)
        #[arg(long)]
        to: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

/// Handle the quick-add subcommands: append one task and report its ordinal.
pub fn handle_quick_add(
    task: Task,
    store: &mut TaskStore,
    storage: &Storage,
) -> Result<(), CliError> {
    let ordinal = store.add(task.clone());
    storage.append_one(&task)?;
    println!("Added task {ordinal}: {}", task.display_line());
    Ok(())
}
