//! Command-line interface for chesshub.

use clap::{Parser, Subcommand};

/// Chesshub - networked chess server
#[derive(Parser, Debug)]
#[command(name = "chesshub")]
#[command(about = "Networked chess server with live broadcast", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the WebSocket server
    Serve {
        /// Path to a TOML config file. Defaults are used when absent.
        #[arg(long)]
        config: Option<std::path::PathBuf>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
