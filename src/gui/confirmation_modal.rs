use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResult {
    None,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestructiveAction {
    DeleteConfig(String),
    ResetTheme,
}

impl DestructiveAction {
    pub fn label(&self) -> String {
        match self {
            Self::DeleteConfig(name) => format!("Delete config '{name}'?"),
            Self::ResetTheme => "Reset all theme settings to defaults?".into(),
        }
    }

    pub fn warning(&self) -> &'static str {
        match self {
            Self::DeleteConfig(_) => "This action cannot be undone.",
            Self::ResetTheme => "Your custom colours and sizes will be lost.",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmationModal {
    open: bool,
    title: String,
    description: String,
    warning: String,
    pending: Option<DestructiveAction>,
}

impl Default for ConfirmationModal {
    fn default() -> Self {
        Self {
            open: false,
            title: "Confirm".into(),
            description: String::new(),
            warning: String::new(),
            pending: None,
        }
    }
}

impl ConfirmationModal {
    pub fn open_for(&mut self, action: DestructiveAction) {
        self.title = match action {
            DestructiveAction::DeleteConfig(_) => "Delete Config".into(),
            DestructiveAction::ResetTheme => "Reset Theme".into(),
        };
        self.description = action.label();
        self.warning = action.warning().into();
        self.pending = Some(action);
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Draw the modal. On confirmation the pending action is handed back.
    pub fn ui(&mut self, ctx: &egui::Context) -> (ConfirmationResult, Option<DestructiveAction>) {
        if !self.open {
            return (ConfirmationResult::None, None);
        }
        let mut result = ConfirmationResult::None;
        let mut open = true;
        egui::Window::new(self.title.clone())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(&self.description);
                ui.colored_label(egui::Color32::YELLOW, &self.warning);
                ui.horizontal(|ui| {
                    if ui.button("Confirm").clicked() {
                        result = ConfirmationResult::Confirmed;
                    }
                    if ui.button("Cancel").clicked() {
                        result = ConfirmationResult::Cancelled;
                    }
                });
            });
        if !open && result == ConfirmationResult::None {
            result = ConfirmationResult::Cancelled;
        }
        if result == ConfirmationResult::None {
            return (result, None);
        }
        self.open = false;
        let action = self.pending.take();
        match result {
            ConfirmationResult::Confirmed => (result, action),
            _ => (result, None),
        }
    }
}
