mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::RustySieveApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Any paths on the command line are analysed before the window opens.
    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Sieve – Grain-Size Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(RustySieveApp::with_files(&paths)))),
    )
}
