use serde::{Deserialize, Serialize};

/// Prefix shared by every pointer-button key id.
pub const MOUSE_ID_PREFIX: &str = "mouse_";

/// A placed, displayable input target. Positions and sizes are in grid units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default = "default_span")]
    pub w: f32,
    #[serde(default = "default_span")]
    pub h: f32,
    /// Idle background override. `None` uses the theme default.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
}

fn default_span() -> f32 {
    1.0
}

/// Smallest width or height a key may have, in grid units.
pub const MIN_SPAN: f32 = 0.5;

impl Key {
    pub fn new(id: impl Into<String>, label: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            x,
            y,
            w: 1.0,
            h: 1.0,
            color: None,
            text_color: None,
        }
    }

    pub fn sized(mut self, w: f32, h: f32) -> Self {
        self.w = w;
        self.h = h;
        self
    }

    pub fn with_colors(mut self, color: Option<&str>, text_color: Option<&str>) -> Self {
        self.color = color.map(str::to_string);
        self.text_color = text_color.map(str::to_string);
        self
    }

    pub fn is_mouse(&self) -> bool {
        self.id.starts_with(MOUSE_ID_PREFIX)
    }

    /// Text drawn on the key. Falls back to the id when the label is empty.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}

/// A named, ordered collection of keys as stored in `<name>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub name: String,
    #[serde(default = "default_layout_tag")]
    pub layout: String,
    #[serde(default)]
    pub keys: Vec<Key>,
}

fn default_layout_tag() -> String {
    "custom".into()
}

impl LayoutConfig {
    pub fn new(name: impl Into<String>, layout: impl Into<String>, keys: Vec<Key>) -> Self {
        Self {
            name: name.into(),
            layout: layout.into(),
            keys,
        }
    }

    /// Wraps keys produced by the editor into a saveable config.
    pub fn custom(name: impl Into<String>, keys: Vec<Key>) -> Self {
        Self::new(name, default_layout_tag(), keys)
    }
}
