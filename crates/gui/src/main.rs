mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state` resolves to the lib crate
// types everywhere in the binary.
pub use meshview_gui_lib::state;

use std::path::PathBuf;

use app::ViewerApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meshview_gui=info".into()),
        )
        .init();

    // Parse --model <path> argument
    let initial_model = parse_model_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("MeshView — 3D Model Viewer")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "meshview-gui",
        native_options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, initial_model)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_model_arg() -> Option<PathBuf> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--model" && i + 1 < args.len() {
            let path = PathBuf::from(&args[i + 1]);
            tracing::info!("Opening model from {}", path.display());
            return Some(path);
        }
        i += 1;
    }
    None
}
