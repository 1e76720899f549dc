use super::{KeyOverlayApp, PromptPurpose};
use crate::editor::canvas_ui;
use eframe::egui;

impl KeyOverlayApp {
    pub(super) fn editor_tab(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut snap = self.editor.snap();
            if ui.checkbox(&mut snap, "Snap to grid").changed() {
                self.editor.set_snap(snap);
            }
            let mut grid = self.editor.show_grid();
            if ui.checkbox(&mut grid, "Show grid").changed() {
                self.editor.set_show_grid(grid);
            }
            ui.separator();
            if ui.button("Add Key").clicked() {
                let id = self.editor.add_key().id.clone();
                tracing::debug!(id = %id, "key added");
            }
            let has_sel = self.editor.selected_index().is_some();
            if ui
                .add_enabled(has_sel, egui::Button::new("Delete Key"))
                .clicked()
            {
                if let Some(key) = self.editor.delete_selected() {
                    tracing::debug!(id = %key.id, "key deleted");
                }
            }
            ui.separator();
            if ui.button("Save Layout").clicked() {
                self.prompt
                    .open(PromptPurpose::SaveEditorLayout, self.current_name.clone());
            }
            ui.label(format!("{} keys", self.editor.keys().len()));
        });
        ui.separator();

        egui::SidePanel::right("key_properties_panel")
            .resizable(false)
            .exact_width(260.0)
            .show_inside(ui, |ui| {
                self.properties.ui(ui, &mut self.editor);
            });

        egui::ScrollArea::both()
            .id_source("editor_canvas")
            .show(ui, |ui| {
                canvas_ui(ui, &mut self.editor);
            });
    }
}
