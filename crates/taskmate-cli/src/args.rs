use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    AddTaskArgs, ClearArgs, DeleteTaskArgs, DoneTaskArgs, ListTasksArgs, ReindexArgs,
    SearchTasksArgs, ShowTaskArgs, UpdateTaskArgs,
};

/// Command-line interface for the taskmate task tracker
///
/// Tasks are kept in a local SQLite database, with a lower-cased copy in a
/// second database used for case-insensitive search. Run without a
/// subcommand to start the interactive shell.
#[derive(Parser)]
#[command(version, about, name = "tm")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/taskmate/tasks.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Path to the search index database file. Defaults to
    /// search_<database file name> next to the database file
    #[arg(long, global = true)]
    pub index_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the taskmate CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// List all tasks or a set of tasks by ID
    #[command(alias = "ls")]
    List(ListTasksArgs),
    /// Show a single task
    #[command(alias = "s")]
    Show(ShowTaskArgs),
    /// Change fields of a task
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Mark a task as done
    Done(DoneTaskArgs),
    /// Delete a task, or every task in a category
    #[command(aliases = ["rm", "del"])]
    Delete(DeleteTaskArgs),
    /// Search tasks by keyword, category and status
    #[command(aliases = ["f", "find"])]
    Search(SearchTasksArgs),
    /// List the categories in use
    Categories,
    /// Rebuild the search index from the task database
    Reindex(ReindexArgs),
    /// Delete every task
    Clear(ClearArgs),
    /// Add a fixed set of sample tasks
    Seed,
    /// Start the interactive shell
    Shell,
}
