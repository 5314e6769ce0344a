mod app;
mod callbacks;
mod color;
mod config;
mod data;
mod error;
mod figure;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::{Context, Result};
use app::LaunchDashApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_default()?;

    // The dataset must load before any window opens.
    let dataset = data::loader::load_file(&config.dataset.path)
        .context("cannot start dashboard without launch records")?;
    if dataset.is_empty() {
        log::warn!("{} contains no launch records", config.dataset.path.display());
    }
    let state = AppState::new(Arc::new(dataset), config.slider.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let title = config.ui.title.clone();
    eframe::run_native(
        &config.ui.title,
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(title, state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}
