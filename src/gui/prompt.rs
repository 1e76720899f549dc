use eframe::egui;

/// What a submitted prompt value is used for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPurpose {
    SavePreset(usize),
    SaveEditorLayout,
    RenameConfig(String),
    DuplicateConfig(String),
    ExportConfig(String),
    ImportConfig,
}

impl PromptPurpose {
    fn title(&self) -> &'static str {
        match self {
            Self::SavePreset(_) => "Save Config",
            Self::SaveEditorLayout => "Save Layout",
            Self::RenameConfig(_) => "Rename Config",
            Self::DuplicateConfig(_) => "Duplicate Config",
            Self::ExportConfig(_) => "Export Config",
            Self::ImportConfig => "Import Config",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::SavePreset(_) | Self::SaveEditorLayout => "Config name:",
            Self::RenameConfig(_) | Self::DuplicateConfig(_) => "New name:",
            Self::ExportConfig(_) => "Destination file:",
            Self::ImportConfig => "JSON file to import:",
        }
    }
}

/// Single-line text prompt shown as a centred window.
#[derive(Debug, Default)]
pub struct TextPrompt {
    purpose: Option<PromptPurpose>,
    value: String,
    focus: bool,
}

impl TextPrompt {
    pub fn open(&mut self, purpose: PromptPurpose, initial: impl Into<String>) {
        self.purpose = Some(purpose);
        self.value = initial.into();
        self.focus = true;
    }

    pub fn is_open(&self) -> bool {
        self.purpose.is_some()
    }

    /// Returns the purpose and trimmed value once the user submits a
    /// non-empty value.
    pub fn ui(&mut self, ctx: &egui::Context) -> Option<(PromptPurpose, String)> {
        let purpose = self.purpose.clone()?;
        let mut submit = false;
        let mut cancel = false;
        let mut open = true;
        egui::Window::new(purpose.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(purpose.label());
                let resp = ui.add(egui::TextEdit::singleline(&mut self.value).desired_width(320.0));
                if self.focus {
                    resp.request_focus();
                    self.focus = false;
                }
                if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        submit = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });
        if !open || cancel {
            self.purpose = None;
            return None;
        }
        let value = self.value.trim().to_string();
        if submit && !value.is_empty() {
            self.purpose = None;
            return Some((purpose, value));
        }
        None
    }
}
