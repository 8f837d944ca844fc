//! Taskmate CLI Application
//!
//! Command-line interface for the taskmate task tracker: one-shot
//! subcommands plus an interactive shell.

mod args;
mod cli;
mod input;
mod renderer;
mod seed;
mod shell;

use std::io;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use shell::Shell;
use taskmate_core::TaskStoreBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        index_file,
        no_color,
        command,
    } = Args::parse();

    let store = TaskStoreBuilder::new()
        .with_database_path(database_file)
        .with_index_path(index_file)
        .build()
        .await
        .context("Failed to initialize task store")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Taskmate started");

    match command {
        None | Some(Commands::Shell) => {
            info!("Starting interactive shell");
            Shell::new(store, renderer, io::stdin().lock(), io::stdout())
                .run()
                .await
        }
        Some(command) => Cli::new(store, renderer).handle_command(command).await,
    }
}
