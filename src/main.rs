mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::RustyCsvApp;
use eframe::egui;
use rusty_csv::config::ViewerConfig;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, load_options) = match ViewerConfig::from_env().and_then(|c| {
        let opts = c.load_options()?;
        Ok((c, opts))
    }) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Ignoring configuration: {e:#}");
            let c = ViewerConfig::default();
            let opts = c.load_options().unwrap_or_default();
            (c, opts)
        }
    };

    let mut state = AppState::new(&config, load_options);
    if let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) {
        if let Err(e) = state.load_path(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty CSV",
        options,
        Box::new(|_cc| Ok(Box::new(RustyCsvApp::new(state)))),
    )
}
