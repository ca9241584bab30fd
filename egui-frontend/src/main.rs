use eframe::egui;
use log::{error, info};

mod api;
mod config;
mod ui;

use config::AppConfig;
use ui::MindTraceApp;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    info!("Starting MindTrace egui client");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([640.0, 520.0])
            .with_title("MindTrace")
            .with_resizable(true),
        ..Default::default()
    };

    info!("Launching egui window");
    eframe::run_native(
        "MindTrace",
        options,
        Box::new(|cc| {
            // profile pictures are fetched by URL
            egui_extras::install_image_loaders(&cc.egui_ctx);

            match MindTraceApp::new(cc.egui_ctx.clone(), config) {
                Ok(app) => {
                    info!("Successfully initialized MindTrace app");
                    Ok(Box::new(app))
                }
                Err(e) => {
                    error!("Failed to initialize app: {:#}", e);
                    Err(format!("Failed to initialize app: {:#}", e).into())
                }
            }
        }),
    )
}
