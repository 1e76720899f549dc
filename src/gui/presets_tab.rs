use super::{DestructiveAction, KeyOverlayApp, PromptPurpose};
use crate::presets::builtin_presets;
use eframe::egui;

impl KeyOverlayApp {
    pub(super) fn presets_tab(&mut self, ui: &mut egui::Ui) {
        ui.columns(2, |cols| {
            self.builtin_column(&mut cols[0]);
            self.saved_column(&mut cols[1]);
        });
    }

    fn builtin_column(&mut self, ui: &mut egui::Ui) {
        ui.heading("Built-in Presets");
        egui::ScrollArea::vertical()
            .id_source("builtin_presets")
            .max_height(420.0)
            .show(ui, |ui| {
                for (i, preset) in builtin_presets().iter().enumerate() {
                    let selected = self.selected_preset == Some(i);
                    if ui.selectable_label(selected, &preset.name).clicked() {
                        self.selected_preset = Some(i);
                    }
                }
            });
        ui.separator();
        ui.horizontal(|ui| {
            let sel = self
                .selected_preset
                .and_then(|i| builtin_presets().get(i).map(|p| (i, p)));
            if ui
                .add_enabled(sel.is_some(), egui::Button::new("Load Preset"))
                .clicked()
            {
                if let Some((_, preset)) = sel {
                    self.load_layout(&preset.keys, &preset.name);
                }
            }
            if ui
                .add_enabled(sel.is_some(), egui::Button::new("Save as Config…"))
                .clicked()
            {
                if let Some((i, preset)) = sel {
                    self.prompt
                        .open(PromptPurpose::SavePreset(i), preset.name.clone());
                }
            }
        });
    }

    fn saved_column(&mut self, ui: &mut egui::Ui) {
        ui.heading("Saved Configs");
        egui::ScrollArea::vertical()
            .id_source("saved_configs")
            .max_height(420.0)
            .show(ui, |ui| {
                if self.configs.is_empty() {
                    ui.weak("No saved configs yet.");
                }
                for name in &self.configs {
                    let selected = self.selected_config.as_deref() == Some(name.as_str());
                    if ui.selectable_label(selected, name).clicked() {
                        self.selected_config = Some(name.clone());
                    }
                }
            });
        ui.separator();

        let sel = self.selected_config.clone();
        let has_sel = sel.is_some();
        ui.horizontal_wrapped(|ui| {
            if ui.add_enabled(has_sel, egui::Button::new("Load")).clicked() {
                if let Some(name) = &sel {
                    self.load_saved(name);
                }
            }
            if ui.add_enabled(has_sel, egui::Button::new("Rename")).clicked() {
                if let Some(name) = &sel {
                    self.prompt
                        .open(PromptPurpose::RenameConfig(name.clone()), name.clone());
                }
            }
            if ui.add_enabled(has_sel, egui::Button::new("Duplicate")).clicked() {
                if let Some(name) = &sel {
                    self.prompt.open(
                        PromptPurpose::DuplicateConfig(name.clone()),
                        format!("{name} copy"),
                    );
                }
            }
            if ui.add_enabled(has_sel, egui::Button::new("Delete")).clicked() {
                if let Some(name) = &sel {
                    self.open_confirm(DestructiveAction::DeleteConfig(name.clone()));
                }
            }
            if ui.add_enabled(has_sel, egui::Button::new("Export")).clicked() {
                if let Some(name) = &sel {
                    self.prompt
                        .open(PromptPurpose::ExportConfig(name.clone()), format!("{name}.json"));
                }
            }
            if ui.button("Import").clicked() {
                self.prompt.open(PromptPurpose::ImportConfig, "");
            }
            if ui.button("Refresh").clicked() {
                self.refresh_configs();
            }
        });
    }

    fn load_saved(&mut self, name: &str) {
        match self.store.load_config(name) {
            Ok(Some(config)) => {
                self.load_layout(&config.keys, name);
                self.settings.last_config = Some(name.to_string());
                self.persist_settings();
            }
            Ok(None) => {
                tracing::warn!(name, "config disappeared before load");
                self.refresh_configs();
            }
            Err(e) => self.report_error(&format!("Could not load '{name}'"), e),
        }
    }
}
