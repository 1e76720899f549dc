use super::model::{KeyPatch, LayoutEditor};
use crate::settings::{parse_hex_color, to_hex_color};
use eframe::egui::{self, Color32};

/// Side panel editing the selected key. Keeps the id text between frames so
/// it is only committed once editing finishes.
#[derive(Debug, Default)]
pub struct PropertiesPanel {
    bound: Option<(usize, String)>,
    id_buffer: String,
}

impl PropertiesPanel {
    /// Returns `true` when the selected key changed.
    pub fn ui(&mut self, ui: &mut egui::Ui, editor: &mut LayoutEditor) -> bool {
        let Some(key) = editor.selected().cloned() else {
            self.bound = None;
            ui.heading("No key selected");
            ui.label("Click a key on the canvas or add a new one.");
            return false;
        };
        let Some(index) = editor.selected_index() else {
            return false;
        };
        let binding = (index, key.id.clone());
        if self.bound.as_ref() != Some(&binding) {
            self.id_buffer = key.id.clone();
            self.bound = Some(binding);
        }

        ui.heading(format!("Key: {}", key.id));
        let mut patch = KeyPatch::default();

        egui::Grid::new("key_properties")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("ID");
                let resp = ui.text_edit_singleline(&mut self.id_buffer);
                if resp.lost_focus() && self.id_buffer.trim() != key.id {
                    patch.id = Some(self.id_buffer.clone());
                }
                ui.end_row();

                ui.label("Label");
                let mut label = key.label.clone();
                if ui.text_edit_singleline(&mut label).changed() {
                    patch.label = Some(label);
                }
                ui.end_row();

                for (name, value, min, slot) in [
                    ("X", key.x, 0.0, &mut patch.x),
                    ("Y", key.y, 0.0, &mut patch.y),
                    ("W", key.w, 0.5, &mut patch.w),
                    ("H", key.h, 0.5, &mut patch.h),
                ] {
                    ui.label(name);
                    let mut v = value;
                    let drag = egui::DragValue::new(&mut v)
                        .speed(0.25)
                        .clamp_range(min..=60.0)
                        .fixed_decimals(2);
                    if ui.add(drag).changed() {
                        *slot = Some(v);
                    }
                    ui.end_row();
                }

                ui.label("Colour");
                if let Some(change) = color_row(ui, key.color.as_deref(), "#2a2a3a") {
                    patch.color = Some(change);
                }
                ui.end_row();

                ui.label("Text colour");
                if let Some(change) = color_row(ui, key.text_color.as_deref(), "#ffffff") {
                    patch.text_color = Some(change);
                }
                ui.end_row();
            });

        if patch.is_empty() {
            return false;
        }
        editor.update_selected(patch)
    }
}

/// Colour picker plus a clear button. `Some(None)` clears the override.
fn color_row(ui: &mut egui::Ui, current: Option<&str>, placeholder: &str) -> Option<Option<String>> {
    let mut change = None;
    ui.horizontal(|ui| {
        let mut color = current
            .and_then(parse_hex_color)
            .or_else(|| parse_hex_color(placeholder))
            .unwrap_or(Color32::GRAY);
        if ui.color_edit_button_srgba(&mut color).changed() {
            change = Some(Some(to_hex_color(color)));
        }
        match current {
            Some(value) => {
                ui.monospace(value);
                if ui.small_button("Clear").clicked() {
                    change = Some(None);
                }
            }
            None => {
                ui.weak("theme default");
            }
        }
    });
    change
}
