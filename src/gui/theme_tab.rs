use super::{DestructiveAction, KeyOverlayApp};
use crate::settings::{color_or, to_hex_color, Theme};
use eframe::egui;

const FONT_CHOICES: [&str; 5] = ["Consolas", "Courier New", "Menlo", "Segoe UI", "Arial"];

fn color_row(ui: &mut egui::Ui, label: &str, value: &mut String, fallback: &str) -> bool {
    ui.label(label);
    let mut color = color_or(Some(value.as_str()), fallback);
    let changed = ui.color_edit_button_srgba(&mut color).changed();
    if changed {
        *value = to_hex_color(color);
    }
    ui.monospace(value.as_str());
    ui.end_row();
    changed
}

fn number_row(ui: &mut egui::Ui, label: &str, value: &mut u32, range: std::ops::RangeInclusive<u32>) -> bool {
    ui.label(label);
    let changed = ui
        .add(egui::DragValue::new(value).clamp_range(range))
        .changed();
    ui.label("");
    ui.end_row();
    changed
}

impl KeyOverlayApp {
    pub(super) fn theme_tab(&mut self, ui: &mut egui::Ui) {
        let defaults = Theme::default();
        let mut theme = self.settings.theme.clone();
        let mut changed = false;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Colours");
            egui::Grid::new("theme_colours")
                .num_columns(3)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    changed |= color_row(ui, "Background", &mut theme.bg, &defaults.bg);
                    changed |= color_row(ui, "Key idle", &mut theme.key_idle, &defaults.key_idle);
                    changed |=
                        color_row(ui, "Key pressed", &mut theme.key_pressed, &defaults.key_pressed);
                    changed |= color_row(ui, "Mouse idle", &mut theme.mouse_idle, &defaults.mouse_idle);
                    changed |= color_row(
                        ui,
                        "Mouse pressed",
                        &mut theme.mouse_pressed,
                        &defaults.mouse_pressed,
                    );
                    changed |= color_row(ui, "Key text", &mut theme.key_text, &defaults.key_text);
                    changed |=
                        color_row(ui, "Key outline", &mut theme.key_outline, &defaults.key_outline);
                });

            ui.add_space(8.0);
            ui.heading("Font");
            egui::Grid::new("theme_font")
                .num_columns(3)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Family");
                    egui::ComboBox::from_id_source("font_family")
                        .selected_text(theme.font_family.clone())
                        .show_ui(ui, |ui| {
                            for name in FONT_CHOICES {
                                if ui
                                    .selectable_label(theme.font_family == name, name)
                                    .clicked()
                                {
                                    theme.font_family = name.to_string();
                                    changed = true;
                                }
                            }
                        });
                    ui.label("");
                    ui.end_row();

                    changed |= number_row(ui, "Size (pt)", &mut theme.font_size, 6..=32);

                    ui.label("Bold");
                    changed |= ui.checkbox(&mut theme.font_bold, "").changed();
                    ui.label("");
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.heading("Keys");
            egui::Grid::new("theme_sizes")
                .num_columns(3)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    changed |= number_row(ui, "Corner radius", &mut theme.key_radius, 0..=20);
                    changed |= number_row(ui, "Unit width", &mut theme.key_unit_px, 20..=80);
                    changed |= number_row(ui, "Row height", &mut theme.key_height_px, 20..=80);
                    changed |= number_row(ui, "Gap", &mut theme.key_gap_px, 0..=20);
                });

            ui.add_space(8.0);
            ui.heading("Editor");
            egui::Grid::new("theme_editor")
                .num_columns(3)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    changed |= number_row(ui, "Grid size", &mut theme.grid_size, 8..=120);
                    ui.label("Defaults");
                    changed |= ui.checkbox(&mut theme.snap_to_grid, "Snap to grid").changed();
                    changed |= ui.checkbox(&mut theme.grid_visible, "Show grid").changed();
                    ui.end_row();
                });

            ui.add_space(12.0);
            if ui.button("Reset to Defaults").clicked() {
                self.open_confirm(DestructiveAction::ResetTheme);
            }
        });

        if changed {
            self.apply_theme(theme);
        }
    }
}
