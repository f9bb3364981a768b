use egui::ViewportBuilder;

mod app;
mod constants;
mod ui;

use app::PoiForgeApp;
use poiforge_core::platform::parameters::gui::{APPLICATION_NAME, VIEWPORT_X, VIEWPORT_Y};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    eframe::run_native(
        APPLICATION_NAME,
        eframe::NativeOptions {
            viewport: ViewportBuilder::default().with_inner_size([VIEWPORT_X, VIEWPORT_Y]),
            ..Default::default()
        },
        Box::new(|_cc| Ok(Box::new(PoiForgeApp::new()))),
    )
}
