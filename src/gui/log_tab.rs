use super::KeyOverlayApp;
use eframe::egui::{self, Color32};
use tracing::Level;

fn level_color(level: Level) -> Color32 {
    match level {
        Level::ERROR => Color32::from_rgb(0xff, 0x55, 0x55),
        Level::WARN => Color32::from_rgb(0xff, 0xbf, 0x00),
        Level::INFO => Color32::from_rgb(0x87, 0xce, 0xfa),
        _ => Color32::GRAY,
    }
}

impl KeyOverlayApp {
    pub(super) fn log_tab(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Log");
            if ui.button("Clear Log").clicked() {
                self.log.clear();
            }
        });
        ui.separator();
        let lines = self.log.snapshot();
        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for line in &lines {
                    ui.label(
                        egui::RichText::new(format!("{} {}", line.timestamp, line.text))
                            .monospace()
                            .color(level_color(line.level)),
                    );
                }
            });
    }
}
