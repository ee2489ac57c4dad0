use std::sync::Arc;

use clap::Parser;
use client_core::{load_settings, HttpRecordStore};
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::BookManagerApp;

const APP_TITLE: &str = "Library Management System";

#[derive(Parser, Debug)]
#[command(name = "library-gui", about = "Desktop book manager for a bookapi service")]
struct Args {
    /// Service base URL; overrides library.toml and LIBRARY_API_URL.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    let store = HttpRecordStore::new(&settings.api_base_url)?;
    let api_root = store.api_root().to_string();
    tracing::info!(%api_root, "starting desktop gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(Arc::new(store), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(BookManagerApp::new(cmd_tx, ui_rx, api_root)))),
    )
    .map_err(|err| anyhow::anyhow!("gui exited with error: {err}"))
}
