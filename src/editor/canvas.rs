use super::model::LayoutEditor;
use crate::overlay::paint::{paint_key, resolve_style, to_egui_rect};
use crate::settings::{color_or, parse_hex_color};
use eframe::egui::{self, Color32, Pos2, Rect, Sense, Stroke};

const GRID_LINE: &str = "#2a2a3a";

/// What a frame of canvas interaction did to the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanvasOutcome {
    pub selection_changed: bool,
    pub layout_changed: bool,
}

/// Interactive editing surface. Sized to [`LayoutEditor::canvas_size`], so
/// it belongs inside a scroll area.
pub fn canvas_ui(ui: &mut egui::Ui, editor: &mut LayoutEditor) -> CanvasOutcome {
    let (w, h) = editor.canvas_size();
    let (response, painter) = ui.allocate_painter(egui::vec2(w, h), Sense::click_and_drag());
    let origin = response.rect.min;
    let mut outcome = CanvasOutcome::default();

    let (pressed, down, released, pos) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
        )
    });
    if let Some(pos) = pos {
        let local = pos - origin;
        if pressed && response.hovered() {
            let before = editor.selected_index();
            editor.pointer_down(local.x, local.y);
            outcome.selection_changed = before != editor.selected_index();
        } else if down && editor.is_dragging() {
            outcome.layout_changed = editor.pointer_move(local.x, local.y);
        }
    }
    if released {
        editor.pointer_up();
    }

    paint_canvas(&painter, response.rect, editor);
    outcome
}

fn paint_canvas(painter: &egui::Painter, rect: Rect, editor: &LayoutEditor) {
    let theme = editor.theme();
    painter.rect_filled(rect, 0.0, color_or(Some(&theme.bg), "#111111"));

    if editor.show_grid() {
        let metrics = editor.metrics();
        let stroke = Stroke::new(1.0, parse_hex_color(GRID_LINE).unwrap_or(Color32::DARK_GRAY));
        let mut x = metrics.pad_px;
        while x <= rect.width() {
            painter.line_segment(
                [Pos2::new(rect.min.x + x, rect.min.y), Pos2::new(rect.min.x + x, rect.max.y)],
                stroke,
            );
            x += metrics.col_pitch().max(1.0);
        }
        let mut y = metrics.pad_px;
        while y <= rect.height() {
            painter.line_segment(
                [Pos2::new(rect.min.x, rect.min.y + y), Pos2::new(rect.max.x, rect.min.y + y)],
                stroke,
            );
            y += metrics.row_pitch().max(1.0);
        }
    }

    let metrics = editor.metrics();
    let selected = editor.selected_index();
    for (index, key) in editor.keys().iter().enumerate() {
        let style = resolve_style(key, false, theme);
        let key_rect = to_egui_rect(rect.min, key, &metrics);
        paint_key(painter, key_rect, key.display_label(), &style, theme, 1.0);
        if selected == Some(index) {
            painter.rect_stroke(
                key_rect,
                theme.key_radius as f32,
                Stroke::new(2.0, Color32::WHITE),
            );
        }
    }
}
