mod app;
mod axis;
mod color;
mod config;
mod data;
mod export;
mod scale;
mod scene;
mod state;
mod ui;
mod views;

use std::path::Path;

use app::PokeLensApp;
use config::{Config, CONFIG_FILE};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::load_or_default(Path::new(CONFIG_FILE));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1260.0, 800.0])
            .with_min_inner_size([820.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Poke Lens – Linked Stat Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(PokeLensApp::new(config)))),
    )
}
