mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::ExplorerApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

/// Interactive explorer for S&P 500 sector, EPS and P/E data.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// CSV file with Name, Sector, Earnings/Share and Price/Earnings columns.
    #[arg(env = "SP500_DATA", default_value = "sp500_clean.csv")]
    data: PathBuf,

    /// Initial window width in points.
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Initial window height in points.
    #[arg(long, default_value_t = 900.0)]
    height: f32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    // The dataset is loaded once; without it there is nothing to show.
    let table = data::loader::load_csv(&args.data)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", args.data.display()))
        .with_context(|| format!("loading {}", args.data.display()))?;
    log::info!(
        "Loaded {} companies with extra columns {:?}",
        table.len(),
        table.extra_columns
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(table);
    eframe::run_native(
        "S&P 500 Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(ExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}
