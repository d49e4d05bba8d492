use std::{path::PathBuf, sync::Arc};

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{ContactStore, HttpContactStore, StoreSettings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::events::UiEvent;
use crate::ui::ContactBookApp;

#[derive(Parser, Debug)]
#[command(about = "Desktop contact book")]
struct Args {
    /// Base URL of the contacts service, e.g. http://localhost:5000
    #[arg(long)]
    server_url: Option<String>,
    /// Explicit config file; otherwise contact_book.toml is discovered.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    let settings = StoreSettings::load(args.config.as_deref(), args.server_url.as_deref())
        .context("failed to load contact book settings")?;
    init_tracing(&settings.log_filter);
    tracing::info!(server_url = %settings.server_url, "starting contact book");

    let store: Arc<dyn ContactStore> = Arc::new(
        HttpContactStore::from_settings(&settings).context("failed to set up contact store")?,
    );
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    runtime::launch(store, cmd_rx, ui_tx);

    let server_url = settings.server_url.to_string();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Contacts")
            .with_inner_size([420.0, 720.0])
            .with_min_inner_size([340.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Contact Book",
        options,
        Box::new(move |cc| Ok(Box::new(ContactBookApp::new(cc, cmd_tx, ui_rx, server_url)))),
    )
    .map_err(|err| anyhow!("desktop UI exited with error: {err}"))
}
