//! Garb CLI binary.
//!
//! Drives the generation service as a single local user: manage the
//! wardrobe, start generations, and watch them land in a terminal state.

use clap::Parser;
use garb::{App, AppConfig, Identity};
use garb_core::UserId;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = cli::Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = AppConfig::load()?;
    let app = App::new(config)?;

    // One process, one local user.
    let identity = Identity::authenticated(UserId::new());

    cli::handle_command(&app, &identity, cli.command).await?;
    Ok(())
}
