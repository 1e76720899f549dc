use eframe::egui;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockCtx {
    pub commands: Arc<Mutex<Vec<egui::ViewportCommand>>>,
    pub repaints: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockCtx {
    pub fn repaint_count(&self) -> usize {
        self.repaints.load(Ordering::SeqCst)
    }

    pub fn take_commands(&self) -> Vec<egui::ViewportCommand> {
        std::mem::take(&mut *self.commands.lock().unwrap())
    }
}

// Implement the trait from the main crate so tests can drive the overlay
// without a window.
impl key_overlay::visibility::ViewportCtx for MockCtx {
    fn send_viewport_cmd(&self, cmd: egui::ViewportCommand) {
        self.commands.lock().unwrap().push(cmd);
    }

    fn request_repaint(&self) {
        self.repaints.fetch_add(1, Ordering::SeqCst);
    }
}
