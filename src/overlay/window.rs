use super::renderer::OverlayRenderer;
use crate::visibility::ViewportCtx;
use eframe::egui::{self, Color32, Sense, ViewportBuilder, ViewportClass, ViewportCommand, ViewportId};

const OVERLAY_VIEWPORT: &str = "key_overlay_window";
pub const OVERLAY_TITLE: &str = "Key Overlay";

pub fn overlay_viewport_id() -> ViewportId {
    ViewportId::from_hash_of(OVERLAY_VIEWPORT)
}

/// The overlay's own viewport, seen through the [`ViewportCtx`] seam.
#[derive(Clone)]
pub struct OverlaySurface {
    ctx: egui::Context,
    id: ViewportId,
}

impl OverlaySurface {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            id: overlay_viewport_id(),
        }
    }
}

impl ViewportCtx for OverlaySurface {
    fn send_viewport_cmd(&self, cmd: ViewportCommand) {
        self.ctx.send_viewport_cmd_to(self.id, cmd);
    }

    fn request_repaint(&self) {
        // Immediate viewports are drawn from the root frame.
        self.ctx.request_repaint_of(ViewportId::ROOT);
        self.ctx.request_repaint_of(self.id);
    }
}

/// Window attributes for the overlay, opened at `anchor` (outer top-left).
pub fn viewport_builder<C: ViewportCtx>(
    renderer: &OverlayRenderer<C>,
    anchor: (i32, i32),
) -> ViewportBuilder {
    let (w, h) = renderer.size();
    ViewportBuilder::default()
        .with_title(OVERLAY_TITLE)
        .with_decorations(false)
        .with_transparent(true)
        .with_always_on_top()
        .with_resizable(false)
        .with_taskbar(false)
        .with_mouse_passthrough(renderer.click_through())
        .with_inner_size([w, h])
        .with_position([anchor.0 as f32, anchor.1 as f32])
}

/// Draw the overlay viewport for this frame. Returns `true` when the
/// platform asked to close the window.
pub fn show_overlay<C: ViewportCtx>(
    ctx: &egui::Context,
    renderer: &mut OverlayRenderer<C>,
    anchor: (i32, i32),
) -> bool {
    let builder = viewport_builder(renderer, anchor);
    ctx.show_viewport_immediate(overlay_viewport_id(), builder, |ctx, class| {
        match class {
            ViewportClass::Embedded => {
                egui::Window::new(OVERLAY_TITLE)
                    .resizable(false)
                    .collapsible(false)
                    .show(ctx, |ui| overlay_body(ui, renderer));
            }
            _ => {
                egui::CentralPanel::default()
                    .frame(egui::Frame::none().fill(Color32::TRANSPARENT))
                    .show(ctx, |ui| overlay_body(ui, renderer));
                if let Some(outer) = ctx.input(|i| i.viewport().outer_rect) {
                    renderer.set_position(outer.min.x.round() as i32, outer.min.y.round() as i32);
                }
            }
        }
        ctx.input(|i| i.viewport().close_requested())
    })
}

fn overlay_body<C: ViewportCtx>(ui: &mut egui::Ui, renderer: &mut OverlayRenderer<C>) {
    let (w, h) = renderer.size();
    let (response, painter) = ui.allocate_painter(egui::vec2(w, h), Sense::click_and_drag());
    renderer.paint(&painter, response.rect);

    let (pressed, down) = ui.input(|i| (i.pointer.primary_pressed(), i.pointer.primary_down()));
    if pressed && response.hovered() {
        renderer.begin_drag();
    } else if renderer.is_dragging() && !down {
        renderer.end_drag();
    }
}
