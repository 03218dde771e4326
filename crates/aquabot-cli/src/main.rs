//! AquaBot CLI Application
//!
//! Command-line front end for the AquaBot irrigation assistant.

mod args;
mod cli;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context, Result};
use aquabot_core::AquaBotBuilder;
use args::Args;
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let Args {
        database_file,
        api_url,
        no_color,
        command,
    } = Args::parse();

    let app = AquaBotBuilder::new()
        .with_database_path(database_file)
        .with_api_url(api_url)
        .build()
        .await
        .context("Failed to initialize AquaBot")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("AquaBot started");

    Cli::new(app, renderer).run(command).await
}
