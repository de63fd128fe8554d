//! Muster CLI — the main entry point.
//!
//! Commands:
//! - `init`      — Write a starter configuration file
//! - `inventory` — Seed the ledger and print the roster
//! - `request`   — Dispatch a single JSON request
//! - `repl`      — Interactive JSON request loop

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "muster",
    about = "Muster — SAR asset inventory and allocation ledger",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to ~/.muster/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter configuration file
    Init,

    /// Seed the ledger from config and print the roster
    Inventory,

    /// Dispatch a single JSON request and print the response
    Request {
        /// The request document, e.g. '{"message_type": "get_all_assets"}'
        json: String,

        /// Pretty-print the response
        #[arg(short, long)]
        pretty: bool,
    },

    /// Enter an interactive request loop (one JSON request per line)
    Repl,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init => commands::init::run(cli.config.as_deref()).await?,
        Commands::Inventory => commands::inventory::run(cli.config.as_deref()).await?,
        Commands::Request { json, pretty } => {
            commands::request::run(cli.config.as_deref(), &json, pretty).await?
        }
        Commands::Repl => commands::repl::run(cli.config.as_deref()).await?,
    }

    Ok(())
}
