use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

/// Appearance parameters shared by the overlay and the editor.
///
/// Every field has a serde default so a partially populated theme object
/// merges over the built-in defaults instead of failing to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_key_idle")]
    pub key_idle: String,
    #[serde(default = "default_key_pressed")]
    pub key_pressed: String,
    #[serde(default = "default_mouse_idle")]
    pub mouse_idle: String,
    #[serde(default = "default_mouse_pressed")]
    pub mouse_pressed: String,
    #[serde(default = "default_key_text")]
    pub key_text: String,
    #[serde(default = "default_key_outline")]
    pub key_outline: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Label size in points.
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_true")]
    pub font_bold: bool,
    /// Corner rounding in pixels.
    #[serde(default = "default_key_radius")]
    pub key_radius: u32,
    /// Width of a 1u key in pixels.
    #[serde(default = "default_unit_px")]
    pub key_unit_px: u32,
    #[serde(default = "default_gap_px")]
    pub key_gap_px: u32,
    #[serde(default = "default_unit_px")]
    pub key_height_px: u32,
    #[serde(default = "default_overlay_alpha")]
    pub overlay_alpha: f32,
    /// Editor snap grid size in pixels.
    #[serde(default = "default_unit_px")]
    pub grid_size: u32,
    #[serde(default = "default_true")]
    pub grid_visible: bool,
    #[serde(default = "default_true")]
    pub snap_to_grid: bool,
}

fn default_bg() -> String {
    "#111111".into()
}

fn default_key_idle() -> String {
    "#2a2a3a".into()
}

fn default_key_pressed() -> String {
    "#7b68ee".into()
}

fn default_mouse_idle() -> String {
    "#1e3a5f".into()
}

fn default_mouse_pressed() -> String {
    "#1e90ff".into()
}

fn default_key_text() -> String {
    "#ffffff".into()
}

fn default_key_outline() -> String {
    "#444466".into()
}

fn default_font_family() -> String {
    "Consolas".into()
}

fn default_font_size() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_key_radius() -> u32 {
    6
}

fn default_unit_px() -> u32 {
    44
}

fn default_gap_px() -> u32 {
    4
}

fn default_overlay_alpha() -> f32 {
    0.93
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: default_bg(),
            key_idle: default_key_idle(),
            key_pressed: default_key_pressed(),
            mouse_idle: default_mouse_idle(),
            mouse_pressed: default_mouse_pressed(),
            key_text: default_key_text(),
            key_outline: default_key_outline(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            font_bold: true,
            key_radius: default_key_radius(),
            key_unit_px: default_unit_px(),
            key_gap_px: default_gap_px(),
            key_height_px: default_unit_px(),
            overlay_alpha: default_overlay_alpha(),
            grid_size: default_unit_px(),
            grid_visible: true,
            snap_to_grid: true,
        }
    }
}

impl Theme {
    /// Window opacity clamped into `[0, 1]`.
    pub fn opacity(&self) -> f32 {
        if self.overlay_alpha.is_finite() {
            self.overlay_alpha.clamp(0.0, 1.0)
        } else {
            default_overlay_alpha()
        }
    }
}

/// Process-wide settings persisted as `settings.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub last_config: Option<String>,
    #[serde(default = "default_overlay_pos")]
    pub overlay_x: i32,
    #[serde(default = "default_overlay_pos")]
    pub overlay_y: i32,
}

fn default_overlay_pos() -> i32 {
    100
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            last_config: None,
            overlay_x: default_overlay_pos(),
            overlay_y: default_overlay_pos(),
        }
    }
}

/// Parse `#rgb`, `#rrggbb` or `#aarrggbb` into a colour.
pub fn parse_hex_color(value: &str) -> Option<Color32> {
    let digits = value.trim().strip_prefix('#')?;
    let expanded;
    let digits = if digits.len() == 3 {
        expanded = digits.chars().flat_map(|c| [c, c]).collect::<String>();
        expanded.as_str()
    } else {
        digits
    };
    let bytes = hex::decode(digits).ok()?;
    match bytes.as_slice() {
        [r, g, b] => Some(Color32::from_rgb(*r, *g, *b)),
        [a, r, g, b] => Some(Color32::from_rgba_unmultiplied(*r, *g, *b, *a)),
        _ => None,
    }
}

/// Resolve an optional colour string, substituting `fallback` when it is
/// absent or malformed. The fallback itself falls back to opaque magenta so a
/// broken theme is visible rather than invisible.
pub fn color_or(value: Option<&str>, fallback: &str) -> Color32 {
    if let Some(raw) = value {
        match parse_hex_color(raw) {
            Some(color) => return color,
            None => tracing::trace!(color = raw, fallback, "invalid colour, using fallback"),
        }
    }
    parse_hex_color(fallback).unwrap_or(Color32::from_rgb(255, 0, 255))
}

/// Format a colour as `#rrggbb` (or `#aarrggbb` when not opaque).
pub fn to_hex_color(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{}", hex::encode([r, g, b]))
    } else {
        format!("#{}", hex::encode([a, r, g, b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_theme_merges_over_defaults() {
        let theme: Theme =
            serde_json::from_str(r##"{"key_idle":"#000000","key_unit_px":30}"##).expect("theme");
        assert_eq!(theme.key_idle, "#000000");
        assert_eq!(theme.key_unit_px, 30);
        assert_eq!(theme.key_pressed, "#7b68ee");
        assert_eq!(theme.key_height_px, 44);
        assert!(theme.snap_to_grid);
    }

    #[test]
    fn settings_without_theme_use_default_theme() {
        let settings: Settings =
            serde_json::from_str(r#"{"last_config":"mine"}"#).expect("settings");
        assert_eq!(settings.theme, Theme::default());
        assert_eq!(settings.last_config.as_deref(), Some("mine"));
        assert_eq!((settings.overlay_x, settings.overlay_y), (100, 100));
    }

    #[test]
    fn settings_serialize_with_null_last_config() {
        let value = serde_json::to_value(Settings::default()).expect("serialize");
        assert!(value["last_config"].is_null());
        assert_eq!(value["overlay_x"], 100);
        assert_eq!(value["theme"]["overlay_alpha"].as_f64().map(|a| (a * 100.0).round()), Some(93.0));
    }

    #[test]
    fn parses_short_long_and_alpha_hex_colors() {
        assert_eq!(parse_hex_color("#fff"), Some(Color32::WHITE));
        assert_eq!(
            parse_hex_color("#7b68ee"),
            Some(Color32::from_rgb(0x7b, 0x68, 0xee))
        );
        assert_eq!(
            parse_hex_color("#80ff0000"),
            Some(Color32::from_rgba_unmultiplied(255, 0, 0, 0x80))
        );
        assert_eq!(parse_hex_color("7b68ee"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn malformed_color_uses_fallback() {
        assert_eq!(
            color_or(Some("not-a-colour"), "#2a2a3a"),
            Color32::from_rgb(0x2a, 0x2a, 0x3a)
        );
        assert_eq!(color_or(None, "#ffffff"), Color32::WHITE);
        assert_eq!(color_or(None, "bogus"), Color32::from_rgb(255, 0, 255));
    }

    #[test]
    fn hex_formatting_matches_parser() {
        assert_eq!(to_hex_color(Color32::from_rgb(0x1e, 0x90, 0xff)), "#1e90ff");
    }

    #[test]
    fn opacity_is_clamped() {
        let mut theme = Theme::default();
        theme.overlay_alpha = 1.7;
        assert_eq!(theme.opacity(), 1.0);
        theme.overlay_alpha = f32::NAN;
        assert_eq!(theme.opacity(), 0.93);
    }
}
