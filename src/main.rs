mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::default();

    // A failed load is shown in the status bar; File → Open can recover.
    let mut state = AppState::default();
    if let Err(e) = state.load(&config.data_path) {
        log::warn!("Starting without data: {e:#}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    eframe::run_native(
        &config.title,
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
}
