mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::AniDashApp;
use eframe::egui;
use state::AppState;

/// Catalog loaded at startup when present; File → Open works either way.
const DEFAULT_CATALOG: &str = "data/top_animes.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let mut state = AppState::default();
    let catalog = Path::new(DEFAULT_CATALOG);
    if catalog.exists() {
        match data::loader::load_cached(catalog) {
            Ok(dataset) => state.set_dataset(dataset),
            Err(e) => {
                log::error!("failed to load {DEFAULT_CATALOG}: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    } else {
        log::warn!("{DEFAULT_CATALOG} not found, start with File → Open");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "AniDash – Anime Analytics",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the poster jpgs.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(AniDashApp::new(state)))
        }),
    )
}
