use crate::geometry::{self, content_extent, key_rect, GridMetrics};
use crate::layout::{Key, MIN_SPAN};
use crate::settings::Theme;
use rand::Rng;

/// Smallest canvas the editor lays out, in pixels.
pub const MIN_CANVAS: (f32, f32) = (900.0, 500.0);
/// Grid cell a freshly added key starts in.
pub const NEW_KEY_POS: (f32, f32) = (0.0, 9.0);
pub const NEW_KEY_LABEL: &str = "New";

/// Partial update for the selected key. `None` leaves a field untouched;
/// `Some(None)` on a colour clears the override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyPatch {
    pub id: Option<String>,
    pub label: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub w: Option<f32>,
    pub h: Option<f32>,
    pub color: Option<Option<String>>,
    pub text_color: Option<Option<String>>,
}

impl KeyPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragState {
    index: usize,
    grab_dx: f32,
    grab_dy: f32,
}

/// Working copy of a layout being edited, plus selection and drag state.
///
/// Pointer coordinates are canvas-local pixels with the grid origin at the
/// pad offset, the same space [`geometry::key_rect`] produces.
#[derive(Debug, Clone)]
pub struct LayoutEditor {
    keys: Vec<Key>,
    selected: Option<usize>,
    drag: Option<DragState>,
    theme: Theme,
    snap: bool,
    show_grid: bool,
    canvas_size: (f32, f32),
}

impl LayoutEditor {
    pub fn new(theme: Theme) -> Self {
        let mut editor = Self {
            keys: Vec::new(),
            selected: None,
            drag: None,
            snap: theme.snap_to_grid,
            show_grid: theme.grid_visible,
            theme,
            canvas_size: MIN_CANVAS,
        };
        editor.resize_to_fit();
        editor
    }

    pub fn load_keys(&mut self, keys: &[Key]) {
        self.keys = keys.to_vec();
        self.selected = None;
        self.drag = None;
        self.resize_to_fit();
        tracing::debug!(keys = self.keys.len(), "editor loaded layout");
    }

    /// Independent copy of the working list.
    pub fn get_keys(&self) -> Vec<Key> {
        self.keys.clone()
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Append a 1×1 key with a fresh id and select it.
    pub fn add_key(&mut self) -> &Key {
        let id = self.fresh_id();
        tracing::info!(id = %id, "added key");
        self.keys
            .push(Key::new(id, NEW_KEY_LABEL, NEW_KEY_POS.0, NEW_KEY_POS.1));
        let index = self.keys.len() - 1;
        self.selected = Some(index);
        self.resize_to_fit();
        &self.keys[index]
    }

    fn fresh_id(&self) -> String {
        let mut rng = rand::thread_rng();
        loop {
            let candidate = format!("key_{:06x}", rng.gen_range(0..0x100_0000u32));
            if !self.keys.iter().any(|k| k.id == candidate) {
                return candidate;
            }
        }
    }

    /// Remove the selected key. Returns the removed key, `None` when nothing
    /// was selected.
    pub fn delete_selected(&mut self) -> Option<Key> {
        let index = self.selected.take()?;
        self.drag = None;
        if index >= self.keys.len() {
            return None;
        }
        let removed = self.keys.remove(index);
        tracing::info!(id = %removed.id, "deleted key");
        Some(removed)
    }

    /// Apply `patch` to the selected key. Returns whether a key was selected.
    pub fn update_selected(&mut self, patch: KeyPatch) -> bool {
        let Some(key) = self.selected.and_then(|i| self.keys.get_mut(i)) else {
            return false;
        };
        if let Some(id) = patch.id {
            let id = id.trim();
            if id.is_empty() {
                tracing::warn!("ignoring empty key id");
            } else {
                key.id = id.to_string();
            }
        }
        if let Some(label) = patch.label {
            key.label = label;
        }
        if let Some(x) = patch.x {
            key.x = non_negative(x);
        }
        if let Some(y) = patch.y {
            key.y = non_negative(y);
        }
        if let Some(w) = patch.w {
            key.w = min_span(w);
        }
        if let Some(h) = patch.h {
            key.h = min_span(h);
        }
        if let Some(color) = patch.color {
            key.color = color;
        }
        if let Some(text_color) = patch.text_color {
            key.text_color = text_color;
        }
        self.resize_to_fit();
        true
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Key> {
        self.selected.and_then(|i| self.keys.get(i))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.drag = None;
    }

    /// Topmost key under a canvas point; later keys sit above earlier ones.
    pub fn hit_test(&self, px: f32, py: f32) -> Option<usize> {
        let metrics = self.metrics();
        self.keys
            .iter()
            .enumerate()
            .rev()
            .find(|(_, key)| key_rect(key, &metrics).contains(px, py))
            .map(|(index, _)| index)
    }

    /// Select whatever is under the pointer and start dragging it. Empty
    /// space clears the selection.
    pub fn pointer_down(&mut self, px: f32, py: f32) -> Option<usize> {
        match self.hit_test(px, py) {
            Some(index) => {
                let rect = key_rect(&self.keys[index], &self.metrics());
                self.selected = Some(index);
                self.drag = Some(DragState {
                    index,
                    grab_dx: px - rect.x,
                    grab_dy: py - rect.y,
                });
                Some(index)
            }
            None => {
                self.clear_selection();
                None
            }
        }
    }

    /// Move the dragged key so the grab point follows the pointer. Returns
    /// whether the key's position changed.
    pub fn pointer_move(&mut self, px: f32, py: f32) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let metrics = self.metrics();
        let (raw_x, raw_y) = (px - drag.grab_dx, py - drag.grab_dy);
        let (gx, gy) = if self.snap {
            geometry::snap(raw_x, raw_y, &metrics)
        } else {
            geometry::to_grid(raw_x, raw_y, &metrics)
        };
        let Some(key) = self.keys.get_mut(drag.index) else {
            self.drag = None;
            return false;
        };
        if key.x == gx && key.y == gy {
            return false;
        }
        key.x = gx;
        key.y = gy;
        self.resize_to_fit();
        true
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the theme; snap and grid visibility follow its defaults.
    pub fn set_theme(&mut self, theme: Theme) {
        self.snap = theme.snap_to_grid;
        self.show_grid = theme.grid_visible;
        self.theme = theme;
        self.resize_to_fit();
    }

    pub fn snap(&self) -> bool {
        self.snap
    }

    pub fn set_snap(&mut self, snap: bool) {
        tracing::debug!(snap, "snap to grid");
        self.snap = snap;
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    pub fn metrics(&self) -> GridMetrics {
        GridMetrics::from_theme(&self.theme)
    }

    pub fn canvas_size(&self) -> (f32, f32) {
        self.canvas_size
    }

    /// The working list, ready to hand to persistence.
    pub fn save(&self) -> Vec<Key> {
        self.get_keys()
    }

    fn resize_to_fit(&mut self) {
        let metrics = self.metrics();
        let (right, bottom) = content_extent(&self.keys, &metrics);
        self.canvas_size = (
            MIN_CANVAS.0.max(right.floor() + metrics.pad_px * 4.0),
            MIN_CANVAS.1.max(bottom.floor() + metrics.pad_px * 4.0),
        );
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn min_span(value: f32) -> f32 {
    if value.is_finite() {
        value.max(MIN_SPAN)
    } else {
        MIN_SPAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(keys: &[Key]) -> LayoutEditor {
        let mut editor = LayoutEditor::new(Theme::default());
        editor.load_keys(keys);
        editor
    }

    fn sample() -> Vec<Key> {
        vec![
            Key::new("a", "A", 0.0, 0.0),
            Key::new("b", "B", 1.0, 0.0),
            Key::new("c", "C", 0.0, 1.0),
        ]
    }

    #[test]
    fn load_keys_clears_selection() {
        let mut editor = editor_with(&sample());
        editor.pointer_down(20.0, 20.0);
        assert_eq!(editor.selected_index(), Some(0));
        editor.load_keys(&sample());
        assert_eq!(editor.selected_index(), None);
    }

    #[test]
    fn add_key_selects_new_key_with_defaults() {
        let mut editor = editor_with(&[]);
        let key = editor.add_key().clone();
        assert!(key.id.starts_with("key_"));
        assert_eq!(key.id.len(), "key_".len() + 6);
        assert_eq!((key.x, key.y, key.w, key.h), (0.0, 9.0, 1.0, 1.0));
        assert_eq!(key.label, "New");
        assert_eq!(editor.selected().map(|k| k.id.clone()), Some(key.id));
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let keys = vec![
            Key::new("under", "U", 0.0, 0.0).sized(2.0, 1.0),
            Key::new("over", "O", 1.0, 0.0),
        ];
        let editor = editor_with(&keys);
        let (x, y) = (10.0 + 48.0 + 5.0, 15.0);
        assert_eq!(editor.hit_test(x, y), Some(1));
        assert_eq!(editor.hit_test(15.0, 15.0), Some(0));
        assert_eq!(editor.hit_test(500.0, 500.0), None);
    }

    #[test]
    fn click_on_empty_space_clears_selection() {
        let mut editor = editor_with(&sample());
        editor.pointer_down(20.0, 20.0);
        editor.pointer_down(800.0, 400.0);
        assert_eq!(editor.selected_index(), None);
        assert!(!editor.is_dragging());
    }

    #[test]
    fn drag_keeps_grab_offset_and_snaps() {
        let mut editor = editor_with(&sample());
        editor.set_snap(true);
        editor.pointer_down(30.0, 30.0);
        assert!(editor.pointer_move(30.0 + 48.0 * 2.0 + 10.0, 30.0));
        let key = editor.selected().expect("selected");
        assert_eq!((key.x, key.y), (2.0, 0.0));
        editor.pointer_up();
        assert!(!editor.pointer_move(500.0, 500.0));
    }

    #[test]
    fn drag_without_snap_is_continuous_and_clamped() {
        let mut editor = editor_with(&sample());
        editor.set_snap(false);
        editor.pointer_down(10.0, 10.0);
        editor.pointer_move(10.0 + 24.0, 10.0);
        assert_eq!(editor.selected().map(|k| k.x), Some(0.5));
        editor.pointer_move(-200.0, -200.0);
        let key = editor.selected().expect("selected");
        assert_eq!((key.x, key.y), (0.0, 0.0));
    }

    #[test]
    fn dragging_far_grows_canvas() {
        let mut editor = editor_with(&sample());
        assert_eq!(editor.canvas_size(), MIN_CANVAS);
        editor.pointer_down(20.0, 20.0);
        editor.pointer_move(10.0 + 48.0 * 30.0 + 10.0, 20.0);
        assert!(editor.canvas_size().0 > MIN_CANVAS.0);
    }

    #[test]
    fn update_without_selection_is_noop() {
        let mut editor = editor_with(&sample());
        let patch = KeyPatch {
            label: Some("Z".into()),
            ..KeyPatch::default()
        };
        assert!(!editor.update_selected(patch));
        assert_eq!(editor.get_keys(), sample());
    }

    #[test]
    fn update_patches_only_given_fields() {
        let mut editor = editor_with(&sample());
        editor.pointer_down(20.0, 20.0);
        editor.update_selected(KeyPatch {
            id: Some("  esc ".into()),
            w: Some(0.1),
            color: Some(Some("#ff0000".into())),
            ..KeyPatch::default()
        });
        let key = editor.selected().expect("selected").clone();
        assert_eq!(key.id, "esc");
        assert_eq!(key.label, "A");
        assert_eq!(key.w, MIN_SPAN);
        assert_eq!(key.color.as_deref(), Some("#ff0000"));

        editor.update_selected(KeyPatch {
            id: Some("   ".into()),
            color: Some(None),
            ..KeyPatch::default()
        });
        let key = editor.selected().expect("selected");
        assert_eq!(key.id, "esc");
        assert_eq!(key.color, None);
    }

    #[test]
    fn set_theme_reads_snap_and_grid_defaults() {
        let mut editor = editor_with(&[]);
        let mut theme = Theme::default();
        theme.snap_to_grid = false;
        theme.grid_visible = false;
        editor.set_theme(theme);
        assert!(!editor.snap());
        assert!(!editor.show_grid());
    }
}
