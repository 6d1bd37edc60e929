mod app;
mod data;
mod model;
mod state;
mod ui;

use app::RustyScorerApp;
use eframe::egui;
use model::{ModelCell, MODEL_ARTIFACT};
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    // The model is required before any request can be served; a missing or
    // corrupt artifact is fatal.
    let cell = ModelCell::new(MODEL_ARTIFACT);
    let predictor = match cell.get_or_load() {
        Ok(predictor) => predictor,
        Err(err) => {
            log::error!("failed to load model artifact {:?}: {err}", cell.path());
            eprintln!(
                "rusty-scorer: failed to load model artifact {:?}: {err}",
                cell.path()
            );
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Scorer – Regression Predictions",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyScorerApp::new(AppState::new(predictor))))),
    )
}
