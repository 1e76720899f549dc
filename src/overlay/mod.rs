//! The always-on-top overlay: renderer state, key painting and the egui
//! viewport that hosts it.

pub mod paint;
pub mod renderer;
pub mod window;

pub use renderer::OverlayRenderer;
pub use window::{show_overlay, OverlaySurface};
