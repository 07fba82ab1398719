mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{config::validate_api_base_url, load_settings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::{commands::BackendCommand, runtime};
use controller::events::UiEvent;
use ui::ArtworkViewerApp;

#[derive(Parser, Debug)]
#[command(name = "artwork-viewer", about = "Browse the Art Institute of Chicago artworks")]
struct Args {
    /// Artworks endpoint, overriding viewer.toml and the environment.
    #[arg(long)]
    api_base: Option<String>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load viewer settings")?;
    if let Some(api_base) = args.api_base {
        validate_api_base_url(&api_base)?;
        settings.api_base_url = api_base;
    }
    tracing::info!(api_base_url = %settings.api_base_url, "starting artwork viewer");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let api_base_url = settings.api_base_url.clone();
    runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Art Institute — Artworks")
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Artwork Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(ArtworkViewerApp::new(cmd_tx, ui_rx, api_base_url)))),
    )
    .map_err(|err| anyhow!("viewer window failed: {err}"))
}
