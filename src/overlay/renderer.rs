use super::paint;
use crate::geometry::bounding_size;
use crate::layout::Key;
use crate::settings::Theme;
use crate::visibility::{OverlayVisibility, ViewportCtx};
use eframe::egui::{self, Painter, Rect, Vec2, ViewportCommand, WindowLevel};
use std::collections::HashSet;

/// Owns the displayed layout, the pressed-set and the theme for the overlay
/// window. All methods run on the render thread.
pub struct OverlayRenderer<C: ViewportCtx> {
    ctx: C,
    keys: Vec<Key>,
    theme: Theme,
    pressed: HashSet<String>,
    size: (f32, f32),
    visibility: OverlayVisibility,
    click_through: bool,
    dragging: bool,
    position: (i32, i32),
}

impl<C: ViewportCtx> OverlayRenderer<C> {
    /// Size the surface for `keys` and configure it as a borderless,
    /// always-on-top window.
    pub fn create(ctx: C, keys: Vec<Key>, theme: Theme) -> Self {
        let size = bounding_size(&keys, &theme);
        let renderer = Self {
            ctx,
            keys,
            theme,
            pressed: HashSet::new(),
            size,
            visibility: OverlayVisibility::Hidden,
            click_through: false,
            dragging: false,
            position: (0, 0),
        };
        renderer.ctx.send_viewport_cmd(ViewportCommand::Decorations(false));
        renderer
            .ctx
            .send_viewport_cmd(ViewportCommand::WindowLevel(WindowLevel::AlwaysOnTop));
        renderer.send_size();
        tracing::debug!(keys = renderer.keys.len(), size = ?renderer.size, "overlay created");
        renderer
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn size(&self) -> (f32, f32) {
        self.size
    }

    pub fn visibility(&self) -> OverlayVisibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    pub fn is_pressed(&self, id: &str) -> bool {
        self.pressed.contains(id)
    }

    pub fn pressed(&self) -> &HashSet<String> {
        &self.pressed
    }

    /// Opacity applied to every painted colour.
    pub fn opacity(&self) -> f32 {
        self.theme.opacity()
    }

    /// Replace the displayed layout, optionally with a new theme. The window
    /// and its visibility are kept; press state is not.
    pub fn load_keys(&mut self, keys: Vec<Key>, theme: Option<Theme>) {
        self.keys = keys;
        if let Some(theme) = theme {
            self.theme = theme;
        }
        self.pressed.clear();
        self.resize();
        self.ctx.request_repaint();
        tracing::info!(keys = self.keys.len(), "overlay layout loaded");
    }

    /// Record a transition. Returns whether the pressed-set changed; a repaint
    /// is requested only in that case.
    pub fn update_key(&mut self, id: &str, pressed: bool) -> bool {
        let changed = if pressed {
            self.pressed.insert(id.to_string())
        } else {
            self.pressed.remove(id)
        };
        if changed {
            tracing::debug!(id, pressed, "key state changed");
            self.ctx.request_repaint();
        }
        changed
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.resize();
        self.ctx.request_repaint();
    }

    /// Let pointer input fall through to the windows underneath.
    pub fn set_click_through(&mut self, enabled: bool) {
        if self.click_through == enabled {
            return;
        }
        self.click_through = enabled;
        self.ctx
            .send_viewport_cmd(ViewportCommand::MousePassthrough(enabled));
    }

    pub fn click_through(&self) -> bool {
        self.click_through
    }

    pub fn show(&mut self) {
        if self.visibility.is_visible() {
            return;
        }
        self.visibility = OverlayVisibility::Visible;
        self.ctx.send_viewport_cmd(ViewportCommand::Visible(true));
        self.ctx.request_repaint();
        tracing::info!("overlay shown");
    }

    pub fn hide(&mut self) {
        if !self.visibility.is_visible() {
            return;
        }
        self.visibility = OverlayVisibility::Hidden;
        self.dragging = false;
        self.ctx.send_viewport_cmd(ViewportCommand::Visible(false));
        tracing::info!("overlay hidden");
    }

    /// Start moving the window with the pointer. Ignored while click-through
    /// is on, since the window then never sees the press.
    pub fn begin_drag(&mut self) {
        if self.click_through || self.dragging {
            return;
        }
        self.dragging = true;
        self.ctx.send_viewport_cmd(ViewportCommand::StartDrag);
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Latest on-screen position of the window's outer top-left corner.
    pub fn position(&self) -> (i32, i32) {
        self.position
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.position = (x, y);
    }

    /// Move the window to an absolute position.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.position = (x, y);
        self.ctx.send_viewport_cmd(ViewportCommand::OuterPosition(egui::pos2(
            x as f32, y as f32,
        )));
    }

    /// Paint only the key rectangles; the space between keys stays
    /// transparent.
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        let opacity = self.opacity();
        paint::paint_layout(
            painter,
            rect.min,
            &self.keys,
            &self.theme,
            |id| self.pressed.contains(id),
            opacity,
        );
    }

    fn resize(&mut self) {
        let size = bounding_size(&self.keys, &self.theme);
        if size != self.size {
            self.size = size;
            self.send_size();
        }
    }

    fn send_size(&self) {
        self.ctx
            .send_viewport_cmd(ViewportCommand::InnerSize(Vec2::new(self.size.0, self.size.1)));
    }
}
