use crate::settings::{color_or, Theme};
use eframe::egui;

/// Control-panel visuals derived from the overlay palette.
pub fn theme_to_visuals(theme: &Theme, defaults: &egui::Visuals) -> egui::Visuals {
    let bg = color_or(Some(&theme.bg), "#111111");
    let idle = color_or(Some(&theme.key_idle), "#2a2a3a");
    let accent = color_or(Some(&theme.key_pressed), "#7b68ee");
    let outline = color_or(Some(&theme.key_outline), "#444466");
    let text = color_or(Some(&theme.key_text), "#ffffff");

    let mut visuals = defaults.clone();
    visuals.dark_mode = true;
    visuals.window_fill = bg;
    visuals.panel_fill = bg;
    visuals.extreme_bg_color = bg;
    visuals.override_text_color = Some(text);
    visuals.hyperlink_color = accent;

    visuals.widgets.noninteractive.bg_fill = bg;
    visuals.widgets.noninteractive.bg_stroke.color = outline;
    visuals.widgets.inactive.bg_fill = idle;
    visuals.widgets.inactive.weak_bg_fill = idle;
    visuals.widgets.inactive.bg_stroke.color = outline;
    visuals.widgets.hovered.bg_fill = idle.gamma_multiply(1.3);
    visuals.widgets.hovered.bg_stroke.color = accent;
    visuals.widgets.active.bg_fill = accent;
    visuals.widgets.active.bg_stroke.color = accent;

    visuals.selection.bg_fill = accent;
    visuals.selection.stroke.color = text;
    visuals
}
