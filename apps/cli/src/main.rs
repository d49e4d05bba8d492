use std::path::PathBuf;

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{HttpContactStore, StoreSettings};
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

#[derive(Parser, Debug)]
#[command(name = "contacts", about = "Manage the remote contact book")]
struct Args {
    /// Base URL of the contacts service, e.g. http://localhost:5000
    #[arg(long, global = true)]
    server_url: Option<String>,
    /// Explicit config file; otherwise contact_book.toml is discovered.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = StoreSettings::load(args.config.as_deref(), args.server_url.as_deref())
        .context("failed to load contact book settings")?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(server_url = %settings.server_url, "using contact store");

    let store =
        HttpContactStore::from_settings(&settings).context("failed to set up contact store")?;
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    commands::run(&store, args.command, &mut stdin.lock(), &mut stdout).await
}
