use key_overlay::config_store::ConfigStore;
use key_overlay::gui::KeyOverlayApp;
use key_overlay::{debug_requested, logging, DEBUG_ENV, LOG_FILE_NAME};

use eframe::egui;

fn main() -> anyhow::Result<()> {
    let debug = debug_requested(std::env::var(DEBUG_ENV).ok().as_deref());
    let store = ConfigStore::open_default();
    let log_file = debug.then(|| store.root().join(LOG_FILE_NAME));
    let log = logging::init(debug, log_file);
    let debug_mode = debug;
    tracing::info!(root = %store.root().display(), debug = debug_mode, "application starting");

    let settings = store.load_settings();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Keyboard Overlay - Control Panel")
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Key Overlay",
        native_options,
        Box::new(move |cc| Box::new(KeyOverlayApp::new(cc, store, settings, log))),
    )
    .map_err(|e| anyhow::anyhow!("event loop failed: {e}"))?;
    Ok(())
}
