mod app;
mod components;
mod sim;
mod theme;
mod utils;

use std::sync::Arc;

use stepbox_app_core::{RepaintHook, StepBoxContext};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn run() -> eframe::Result<()> {
    setup_logging();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([720.0, 520.0])
            .with_min_inner_size([480.0, 320.0])
            .with_title("Execution Plan"),
        ..Default::default()
    };

    eframe::run_native(
        "StepBox",
        options,
        Box::new(|cc| {
            theme::setup(&cc.egui_ctx);

            let egui_ctx = cc.egui_ctx.clone();
            let repaint: RepaintHook = Arc::new(move || egui_ctx.request_repaint());
            let context = StepBoxContext::new(repaint).inspect_err(|e| {
                tracing::error!("Failed to start background runtime: {}", e);
            })?;

            Ok(Box::new(app::StepBoxApp::new(context)))
        }),
    )
}
