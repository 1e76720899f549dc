use crate::geometry::{key_rect, GridMetrics};
use crate::layout::Key;
use crate::settings::{color_or, Theme};
use eframe::egui::{Align2, Color32, FontFamily, FontId, Painter, Pos2, Rect, Stroke, Vec2};

/// Labels longer than this many characters are drawn smaller.
pub const LONG_LABEL_CHARS: usize = 5;
const LONG_LABEL_STEP_PT: u32 = 2;
const MIN_LABEL_PT: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyStyle {
    pub fill: Color32,
    pub outline: Color32,
    pub text: Color32,
    pub font_pt: u32,
}

/// Colours and label size for one key.
///
/// A pressed key always shows the theme's pressed colour, even when it has
/// its own idle `color`.
pub fn resolve_style(key: &Key, pressed: bool, theme: &Theme) -> KeyStyle {
    let mouse = key.is_mouse();
    let fill = match (pressed, mouse) {
        (true, true) => color_or(Some(&theme.mouse_pressed), "#1e90ff"),
        (true, false) => color_or(Some(&theme.key_pressed), "#7b68ee"),
        (false, _) if key.color.is_some() => {
            let fallback = if mouse { &theme.mouse_idle } else { &theme.key_idle };
            color_or(key.color.as_deref(), fallback)
        }
        (false, true) => color_or(Some(&theme.mouse_idle), "#1e3a5f"),
        (false, false) => color_or(Some(&theme.key_idle), "#2a2a3a"),
    };
    let text = match key.text_color.as_deref() {
        Some(custom) => color_or(Some(custom), &theme.key_text),
        None => color_or(Some(&theme.key_text), "#ffffff"),
    };
    KeyStyle {
        fill,
        outline: color_or(Some(&theme.key_outline), "#444466"),
        text,
        font_pt: label_font_pt(key.display_label(), theme.font_size),
    }
}

pub fn label_font_pt(label: &str, base_pt: u32) -> u32 {
    if label.chars().count() > LONG_LABEL_CHARS {
        base_pt.saturating_sub(LONG_LABEL_STEP_PT).max(MIN_LABEL_PT)
    } else {
        base_pt
    }
}

pub fn pt_to_px(pt: u32) -> f32 {
    pt as f32 * 96.0 / 72.0
}

/// Map a theme font name onto one of egui's two built-in families.
///
/// egui ships no bold face, so `font_bold` is drawn as a second pass offset
/// by a fraction of a pixel (see [`paint_key`]). At small sizes this reads
/// as slightly blurred rather than truly bold.
pub fn font_family(name: &str) -> FontFamily {
    let lower = name.to_ascii_lowercase();
    if ["mono", "consolas", "courier", "menlo"]
        .iter()
        .any(|hint| lower.contains(hint))
    {
        FontFamily::Monospace
    } else {
        FontFamily::Proportional
    }
}

pub fn to_egui_rect(origin: Pos2, key: &Key, metrics: &GridMetrics) -> Rect {
    let r = key_rect(key, metrics);
    Rect::from_min_size(origin + Vec2::new(r.x, r.y), Vec2::new(r.w, r.h))
}

/// Paint a single key. `opacity` scales every colour, which is how the
/// overlay's window alpha is applied.
pub fn paint_key(
    painter: &Painter,
    rect: Rect,
    label: &str,
    style: &KeyStyle,
    theme: &Theme,
    opacity: f32,
) {
    let rounding = theme.key_radius as f32;
    painter.rect(
        rect,
        rounding,
        style.fill.gamma_multiply(opacity),
        Stroke::new(1.0, style.outline.gamma_multiply(opacity)),
    );

    let font = FontId::new(pt_to_px(style.font_pt), font_family(&theme.font_family));
    let color = style.text.gamma_multiply(opacity);
    let center = rect.center();
    painter.text(center, Align2::CENTER_CENTER, label, font.clone(), color);
    // Faux bold: egui has no bold family.
    if theme.font_bold {
        painter.text(
            center + Vec2::new(0.6, 0.0),
            Align2::CENTER_CENTER,
            label,
            font,
            color,
        );
    }
}

/// Paint a whole layout with its top-left grid corner at `origin`.
pub fn paint_layout(
    painter: &Painter,
    origin: Pos2,
    keys: &[Key],
    theme: &Theme,
    is_pressed: impl Fn(&str) -> bool,
    opacity: f32,
) {
    let metrics = GridMetrics::from_theme(theme);
    for key in keys {
        let style = resolve_style(key, is_pressed(&key.id), theme);
        let rect = to_egui_rect(origin, key, &metrics);
        paint_key(painter, rect, key.display_label(), &style, theme, opacity);
    }
}
