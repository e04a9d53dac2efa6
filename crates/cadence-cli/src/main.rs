//! Cadence CLI Application
//!
//! Command-line interface for the cadence attendance tracker.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use cadence_core::{models::UserScope, StoreBuilder, Tracker};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        user,
        scope,
        plan,
        command,
    } = Args::parse();

    let owner = UserScope::new(scope, user.unwrap_or_default())
        .context("Pass --user or set CADENCE_USER")?;

    let store = StoreBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize store")?;

    let tracker = Tracker::open(store, owner, plan)
        .await
        .context("Failed to open tracker")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Cadence started");

    let mut cli = Cli::new(tracker, renderer);
    match command {
        Some(Plan { command }) => cli.handle_plan_command(command).await,
        Some(Toggle(args)) => cli.toggle(args).await,
        Some(Cycle { command }) => cli.handle_cycle_command(command).await,
        Some(Summary(args)) => cli.summary(&args),
        Some(Watch) => cli.watch().await,
        Some(Show) | None => cli.show(),
    }
}
