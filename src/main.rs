mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::TrendsDashboardApp;
use clap::Parser;
use config::DashboardConfig;
use data::DataContext;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::parse();
    log::debug!("Configuration: {config:?}");

    // Startup load errors are fatal; there is no degraded mode.
    let data = DataContext::load(&config)
        .with_context(|| format!("loading trend exports from {}", config.data_dir.display()))?;
    log::info!(
        "Ready: {} region rows over {} years, {} weeks",
        data.regions.len(),
        data.years().len(),
        data.week_count()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Trends Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(TrendsDashboardApp::new(data, config)))),
    )
    .map_err(|e| anyhow::anyhow!("running the viewer: {e}"))
}
