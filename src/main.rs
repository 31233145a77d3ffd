//! Chesshub - networked chess server binary.

#![warn(missing_docs)]

mod cli;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chesshub::auth::TokenTable;
use chesshub::chess::Color;
use chesshub::directory::MemoryDirectory;
use chesshub::storage::MemoryGameStore;
use chesshub::{Coordinator, ServerConfig};
use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
    }
}

/// Run the WebSocket chess server.
async fn run_server(
    config_path: Option<std::path::PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = match config_path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    config.apply_overrides(host, port);

    info!("starting chesshub server");

    // In-memory collaborators, seeded from the config file. Real auth
    // and lobby services replace these at this construction point.
    let auth = Arc::new(TokenTable::new());
    for seed in config.tokens() {
        auth.insert(seed.token().clone(), seed.identity().clone());
    }

    let directory = Arc::new(MemoryDirectory::new());
    for seed in config.matches() {
        directory.create_match(*seed.id(), seed.name().clone());
        if let Some(white) = seed.white() {
            directory.seat_player(*seed.id(), Color::White, white.clone())?;
        }
        if let Some(black) = seed.black() {
            directory.seat_player(*seed.id(), Color::Black, black.clone())?;
        }
    }

    let store = Arc::new(MemoryGameStore::new());
    let coordinator = Arc::new(Coordinator::new(auth, directory, store, &config));

    chesshub::serve(&config, coordinator).await?;
    Ok(())
}
