use eframe::egui;

/// The slice of a rendering surface the overlay and editor need. Implemented
/// for `egui::Context` and for the overlay's own viewport; tests use a mock.
pub trait ViewportCtx {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand);
    fn request_repaint(&self);
}

impl ViewportCtx for egui::Context {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        egui::Context::send_viewport_cmd(self, cmd);
    }

    fn request_repaint(&self) {
        egui::Context::request_repaint(self);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayVisibility {
    #[default]
    Hidden,
    Visible,
}

impl OverlayVisibility {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_starts_hidden() {
        assert_eq!(OverlayVisibility::default(), OverlayVisibility::Hidden);
        assert!(!OverlayVisibility::Hidden.is_visible());
        assert!(OverlayVisibility::Visible.is_visible());
    }
}
