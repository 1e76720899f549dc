pub mod bridge;
pub mod config_store;
pub mod editor;
pub mod geometry;
pub mod gui;
pub mod input;
pub mod layout;
pub mod logging;
pub mod overlay;
pub mod presets;
pub mod settings;
pub mod visibility;

/// Environment variable that turns on debug logging and the log file.
pub const DEBUG_ENV: &str = "KEY_OVERLAY_DEBUG";

/// Log file name inside the storage root, written only in debug mode.
pub const LOG_FILE_NAME: &str = "overlay.log";

/// `true` when `value` (the contents of [`DEBUG_ENV`]) asks for debug mode.
pub fn debug_requested(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
