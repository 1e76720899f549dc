//! Control panel: the eframe root viewport hosting the Overlay, Presets,
//! Editor, Theme and Log tabs, plus the overlay viewport it drives.

mod confirmation_modal;
mod editor_tab;
mod log_tab;
mod overlay_tab;
mod presets_tab;
mod prompt;
mod theme;
mod theme_tab;

pub use confirmation_modal::{ConfirmationModal, ConfirmationResult, DestructiveAction};
pub use prompt::{PromptPurpose, TextPrompt};
pub use theme::theme_to_visuals;

use crate::bridge::EventBridge;
use crate::config_store::ConfigStore;
use crate::editor::{LayoutEditor, PropertiesPanel};
use crate::input::{InputCapture, KeyTransition, TransitionCallback};
use crate::layout::{Key, LayoutConfig};
use crate::logging::LogBuffer;
use crate::overlay::{show_overlay, OverlayRenderer, OverlaySurface};
use crate::presets::builtin_presets;
use crate::settings::{Settings, Theme};
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::sync::Arc;

const TOAST_SECS: f64 = 4.0;

type Overlay = OverlayRenderer<OverlaySurface>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Tab {
    #[default]
    Overlay,
    Presets,
    Editor,
    Theme,
    Log,
}

impl Tab {
    const ALL: [Tab; 5] = [Tab::Overlay, Tab::Presets, Tab::Editor, Tab::Theme, Tab::Log];

    fn title(self) -> &'static str {
        match self {
            Tab::Overlay => "Overlay",
            Tab::Presets => "Presets",
            Tab::Editor => "Editor",
            Tab::Theme => "Theme",
            Tab::Log => "Log",
        }
    }
}

fn push_toast(toasts: &mut Toasts, kind: ToastKind, text: impl Into<String>) {
    let text: String = text.into();
    toasts.add(Toast {
        text: text.into(),
        kind,
        options: ToastOptions::default().duration_in_seconds(TOAST_SECS),
    });
}

pub struct KeyOverlayApp {
    ctx: egui::Context,
    store: ConfigStore,
    settings: Settings,
    current_keys: Vec<Key>,
    current_name: String,
    overlay: Overlay,
    bridge: EventBridge<Overlay>,
    capture: InputCapture,
    editor: LayoutEditor,
    properties: PropertiesPanel,
    log: LogBuffer,
    toasts: Toasts,
    tab: Tab,
    confirm: ConfirmationModal,
    prompt: TextPrompt,
    selected_preset: Option<usize>,
    selected_config: Option<String>,
    configs: Vec<String>,
}

impl KeyOverlayApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: ConfigStore,
        settings: Settings,
        log: LogBuffer,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        ctx.set_visuals(theme_to_visuals(&settings.theme, &egui::Visuals::dark()));

        let (current_name, current_keys) = builtin_presets()
            .first()
            .map(|p| (p.name.clone(), p.keys.clone()))
            .unwrap_or_default();

        let overlay = OverlayRenderer::create(
            OverlaySurface::new(ctx.clone()),
            current_keys.clone(),
            settings.theme.clone(),
        );

        let mut bridge: EventBridge<Overlay> = EventBridge::new();
        if let Err(e) = bridge.subscribe(|overlay: &mut Overlay, t: &KeyTransition| {
            if overlay.is_visible() {
                overlay.update_key(&t.id, t.pressed);
            }
        }) {
            tracing::error!(error = %e, "could not subscribe overlay to input");
        }
        let wake_ctx = ctx.clone();
        bridge.set_waker(move || wake_ctx.request_repaint());

        let publisher = bridge.publisher();
        let callback: TransitionCallback = Arc::new(move |id: &str, pressed: bool| {
            publisher.publish(id, pressed);
        });
        let mut capture = InputCapture::new(callback);
        capture.start();

        let mut editor = LayoutEditor::new(settings.theme.clone());
        editor.load_keys(&current_keys);

        let mut app = Self {
            ctx,
            store,
            settings,
            current_keys,
            current_name,
            overlay,
            bridge,
            capture,
            editor,
            properties: PropertiesPanel::default(),
            log,
            toasts: Toasts::new().anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0]),
            tab: Tab::default(),
            confirm: ConfirmationModal::default(),
            prompt: TextPrompt::default(),
            selected_preset: None,
            selected_config: None,
            configs: Vec::new(),
        };
        app.refresh_configs();
        app.restore_last_config();
        tracing::info!("application ready");
        app
    }

    fn restore_last_config(&mut self) {
        let Some(name) = self.settings.last_config.clone() else {
            return;
        };
        match self.store.load_config(&name) {
            Ok(Some(config)) => {
                self.load_layout(&config.keys, &name);
                tracing::info!(name = %name, "restored last config");
            }
            Ok(None) => tracing::warn!(name = %name, "last config no longer exists"),
            Err(e) => tracing::error!(error = %format!("{e:#}"), "could not restore last config"),
        }
    }

    fn notify(&mut self, text: impl Into<String>) {
        push_toast(&mut self.toasts, ToastKind::Info, text);
    }

    fn report_error(&mut self, what: &str, err: anyhow::Error) {
        tracing::error!(error = %format!("{err:#}"), "{what}");
        push_toast(&mut self.toasts, ToastKind::Error, format!("{what}: {err}"));
    }

    /// Make `keys` the current layout in the editor and the overlay.
    fn load_layout(&mut self, keys: &[Key], name: &str) {
        self.current_keys = keys.to_vec();
        self.current_name = name.to_string();
        self.editor.load_keys(&self.current_keys);
        self.overlay.load_keys(self.current_keys.clone(), None);
        tracing::info!(name, keys = keys.len(), "layout loaded");
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.store.save_settings(&self.settings) {
            self.report_error("Could not save settings", e);
        }
    }

    fn refresh_configs(&mut self) {
        match self.store.list_configs() {
            Ok(names) => {
                if let Some(sel) = &self.selected_config {
                    if !names.contains(sel) {
                        self.selected_config = None;
                    }
                }
                self.configs = names;
                tracing::debug!(count = self.configs.len(), "config list refreshed");
            }
            Err(e) => self.report_error("Could not list configs", e),
        }
    }

    /// Persist `theme` and push it to every consumer.
    fn apply_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
        self.persist_settings();
        self.editor.set_theme(self.settings.theme.clone());
        self.overlay.set_theme(self.settings.theme.clone());
        self.ctx
            .set_visuals(theme_to_visuals(&self.settings.theme, &egui::Visuals::dark()));
    }

    fn show_overlay_window(&mut self) {
        let (x, y) = (self.settings.overlay_x, self.settings.overlay_y);
        self.overlay.load_keys(self.current_keys.clone(), None);
        self.overlay.set_position(x, y);
        self.overlay.show();
    }

    fn hide_overlay_window(&mut self) {
        if !self.overlay.is_visible() {
            return;
        }
        self.record_overlay_position();
        self.overlay.hide();
        self.persist_settings();
    }

    fn record_overlay_position(&mut self) {
        if self.overlay.is_visible() {
            let (x, y) = self.overlay.position();
            self.settings.overlay_x = x;
            self.settings.overlay_y = y;
        }
    }

    fn open_confirm(&mut self, action: DestructiveAction) {
        self.confirm.open_for(action);
    }

    fn run_confirmed(&mut self, action: DestructiveAction) {
        match action {
            DestructiveAction::DeleteConfig(name) => match self.store.delete_config(&name) {
                Ok(()) => {
                    if self.settings.last_config.as_deref() == Some(name.as_str()) {
                        self.settings.last_config = None;
                        self.persist_settings();
                    }
                    self.refresh_configs();
                    self.notify(format!("Deleted '{name}'"));
                }
                Err(e) => self.report_error("Could not delete config", e),
            },
            DestructiveAction::ResetTheme => {
                self.apply_theme(Theme::default());
                tracing::info!("theme reset to defaults");
                self.notify("Theme reset to defaults");
            }
        }
    }

    fn run_prompt(&mut self, purpose: PromptPurpose, value: String) {
        match purpose {
            PromptPurpose::SavePreset(index) => {
                let Some(preset) = builtin_presets().get(index) else {
                    return;
                };
                let config = crate::config_store::preset_to_config(preset);
                match self.store.save_config(&value, &config) {
                    Ok(_) => {
                        self.refresh_configs();
                        tracing::info!(name = %value, "preset saved as config");
                        self.notify(format!("Saved '{value}'"));
                    }
                    Err(e) => self.report_error(&format!("Could not save config '{value}'"), e),
                }
            }
            PromptPurpose::SaveEditorLayout => {
                let keys = self.editor.save();
                let config = LayoutConfig::custom(value.clone(), keys.clone());
                match self.store.save_config(&value, &config) {
                    Ok(_) => {
                        self.load_layout(&keys, &value);
                        self.refresh_configs();
                        self.selected_config = Some(value.clone());
                        self.settings.last_config = Some(value.clone());
                        self.persist_settings();
                        self.notify(format!("Saved layout '{value}'"));
                    }
                    Err(e) => self.report_error(&format!("Could not save layout '{value}'"), e),
                }
            }
            PromptPurpose::RenameConfig(old) => {
                if old == value {
                    return;
                }
                match self.store.rename_config(&old, &value) {
                    Ok(()) => {
                        if self.settings.last_config.as_deref() == Some(old.as_str()) {
                            self.settings.last_config = Some(value.clone());
                            self.persist_settings();
                        }
                        self.selected_config = Some(value);
                        self.refresh_configs();
                    }
                    Err(e) => self.report_error("Could not rename config", e),
                }
            }
            PromptPurpose::DuplicateConfig(name) => {
                match self.store.duplicate_config(&name, &value) {
                    Ok(()) => {
                        self.selected_config = Some(value);
                        self.refresh_configs();
                    }
                    Err(e) => self.report_error("Could not duplicate config", e),
                }
            }
            PromptPurpose::ExportConfig(name) => {
                match self.store.export_config(&name, std::path::Path::new(&value)) {
                    Ok(()) => self.notify(format!("Exported '{name}' to {value}")),
                    Err(e) => self.report_error("Could not export config", e),
                }
            }
            PromptPurpose::ImportConfig => {
                match self.store.import_config(std::path::Path::new(&value)) {
                    Ok(name) => {
                        self.selected_config = Some(name.clone());
                        self.refresh_configs();
                        self.notify(format!("Imported '{name}'"));
                    }
                    Err(e) => self.report_error("Could not import config", e),
                }
            }
        }
    }

    fn modals(&mut self, ctx: &egui::Context) {
        if let (ConfirmationResult::Confirmed, Some(action)) = self.confirm.ui(ctx) {
            self.run_confirmed(action);
        }
        if let Some((purpose, value)) = self.prompt.ui(ctx) {
            self.run_prompt(purpose, value);
        }
    }
}

impl eframe::App for KeyOverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.bridge.pump(&mut self.overlay);

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.tab, tab, tab.title());
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Overlay => self.overlay_tab(ui),
            Tab::Presets => self.presets_tab(ui),
            Tab::Editor => self.editor_tab(ui),
            Tab::Theme => self.theme_tab(ui),
            Tab::Log => self.log_tab(ui),
        });

        if self.overlay.is_visible() {
            let anchor = (self.settings.overlay_x, self.settings.overlay_y);
            if show_overlay(ctx, &mut self.overlay, anchor) {
                self.hide_overlay_window();
            }
        }

        self.modals(ctx);
        self.toasts.show(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.capture.stop();
        self.record_overlay_position();
        if let Err(e) = self.store.save_settings(&self.settings) {
            tracing::error!(error = %format!("{e:#}"), "could not save settings on exit");
        }
        tracing::info!("application closing");
    }
}
