use super::KeyOverlayApp;
use eframe::egui;

impl KeyOverlayApp {
    pub(super) fn overlay_tab(&mut self, ui: &mut egui::Ui) {
        ui.heading("Overlay");
        ui.add_space(6.0);

        let visible = self.overlay.is_visible();
        ui.horizontal(|ui| {
            let status = if visible {
                "Overlay: Visible"
            } else {
                "Overlay: Hidden"
            };
            ui.label(status);
            let label = if visible { "Hide Overlay" } else { "Show Overlay" };
            if ui.button(label).clicked() {
                if visible {
                    self.hide_overlay_window();
                } else {
                    self.show_overlay_window();
                }
            }
        });
        ui.horizontal(|ui| {
            ui.label("Current layout:");
            ui.strong(&self.current_name);
            ui.label(format!("({} keys)", self.current_keys.len()));
        });
        ui.separator();

        let mut theme = self.settings.theme.clone();
        let mut changed = false;
        egui::Grid::new("overlay_controls")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Opacity");
                let mut pct = (theme.opacity() * 100.0).round() as u32;
                if ui
                    .add(egui::Slider::new(&mut pct, 20..=100).suffix("%"))
                    .changed()
                {
                    theme.overlay_alpha = pct as f32 / 100.0;
                    changed = true;
                }
                ui.end_row();

                ui.label("Key unit size");
                if ui
                    .add(
                        egui::DragValue::new(&mut theme.key_unit_px)
                            .clamp_range(20..=80)
                            .suffix(" px"),
                    )
                    .changed()
                {
                    changed = true;
                }
                ui.end_row();

                ui.label("Click-through");
                let mut click_through = self.overlay.click_through();
                if ui
                    .checkbox(&mut click_through, "Let clicks pass to windows below")
                    .changed()
                {
                    self.overlay.set_click_through(click_through);
                }
                ui.end_row();
            });
        if changed {
            self.apply_theme(theme);
        }

        ui.add_space(8.0);
        ui.weak("Drag the overlay to move it. Its position is remembered.");
    }
}
