use eframe::egui;
use key_overlay::layout::Key;
use key_overlay::overlay::paint::resolve_style;
use key_overlay::overlay::OverlayRenderer;
use key_overlay::settings::color_or;
use key_overlay::presets::{find_preset, FULL_QWERTY};
use key_overlay::settings::Theme;

#[path = "mock_ctx.rs"]
mod mock_ctx;
use mock_ctx::MockCtx;

fn two_keys() -> Vec<Key> {
    vec![Key::new("a", "A", 0.0, 0.0), Key::new("b", "B", 1.0, 0.0)]
}

#[test]
fn create_configures_borderless_on_top_window() {
    let ctx = MockCtx::default();
    let _overlay = OverlayRenderer::create(ctx.clone(), two_keys(), Theme::default());
    let cmds = ctx.take_commands();
    assert!(cmds
        .iter()
        .any(|c| matches!(c, egui::ViewportCommand::Decorations(false))));
    assert!(cmds.iter().any(|c| matches!(
        c,
        egui::ViewportCommand::WindowLevel(egui::WindowLevel::AlwaysOnTop)
    )));
    assert!(cmds
        .iter()
        .any(|c| matches!(c, egui::ViewportCommand::InnerSize(_))));
}

#[test]
fn repeated_press_repaints_once() {
    let ctx = MockCtx::default();
    let mut overlay = OverlayRenderer::create(ctx.clone(), two_keys(), Theme::default());
    let before = ctx.repaint_count();
    assert!(overlay.update_key("a", true));
    assert!(!overlay.update_key("a", true));
    assert_eq!(ctx.repaint_count(), before + 1);
}

#[test]
fn press_release_transitions() {
    let ctx = MockCtx::default();
    let mut overlay = OverlayRenderer::create(ctx, two_keys(), Theme::default());
    assert!(overlay.pressed().is_empty());
    overlay.update_key("a", true);
    assert!(overlay.is_pressed("a"));
    assert_eq!(overlay.pressed().len(), 1);
    overlay.update_key("a", false);
    assert!(overlay.pressed().is_empty());
}

#[test]
fn release_without_press_is_ignored() {
    let ctx = MockCtx::default();
    let mut overlay = OverlayRenderer::create(ctx.clone(), two_keys(), Theme::default());
    let before = ctx.repaint_count();
    assert!(!overlay.update_key("zzz", false));
    assert!(overlay.pressed().is_empty());
    assert_eq!(ctx.repaint_count(), before);
}

#[test]
fn load_keys_clears_pressed_and_repaints() {
    let ctx = MockCtx::default();
    let mut overlay = OverlayRenderer::create(ctx.clone(), two_keys(), Theme::default());
    overlay.update_key("a", true);
    let before = ctx.repaint_count();
    overlay.load_keys(vec![Key::new("c", "C", 0.0, 0.0)], None);
    assert!(overlay.pressed().is_empty());
    assert_eq!(overlay.keys().len(), 1);
    assert!(ctx.repaint_count() > before);
}

#[test]
fn qwerty_width_ignores_alpha() {
    let preset = find_preset(FULL_QWERTY).expect("preset");
    let opaque = Theme {
        overlay_alpha: 1.0,
        ..Theme::default()
    };
    let faint = Theme {
        overlay_alpha: 0.2,
        ..Theme::default()
    };
    let a = OverlayRenderer::create(MockCtx::default(), preset.keys.clone(), opaque);
    let b = OverlayRenderer::create(MockCtx::default(), preset.keys.clone(), faint);
    assert_eq!(a.size().0, b.size().0);
    assert!(a.size().0 > 0.0);
}

#[test]
fn show_hide_round_trip() {
    let ctx = MockCtx::default();
    let mut overlay = OverlayRenderer::create(ctx.clone(), two_keys(), Theme::default());
    ctx.take_commands();
    overlay.show();
    assert!(overlay.is_visible());
    overlay.hide();
    assert!(!overlay.is_visible());
    let cmds = ctx.take_commands();
    assert!(matches!(cmds.first(), Some(egui::ViewportCommand::Visible(true))));
    assert!(matches!(cmds.last(), Some(egui::ViewportCommand::Visible(false))));
}

#[test]
fn drag_blocked_while_click_through() {
    let ctx = MockCtx::default();
    let mut overlay = OverlayRenderer::create(ctx.clone(), two_keys(), Theme::default());
    overlay.set_click_through(true);
    ctx.take_commands();
    overlay.begin_drag();
    assert!(!overlay.is_dragging());
    assert!(ctx.take_commands().is_empty());

    overlay.set_click_through(false);
    ctx.take_commands();
    overlay.begin_drag();
    assert!(overlay.is_dragging());
    assert!(matches!(
        ctx.take_commands().as_slice(),
        [egui::ViewportCommand::StartDrag]
    ));
    overlay.end_drag();
    assert!(!overlay.is_dragging());
}

#[test]
fn keys_sharing_an_id_light_up_together() {
    let keys = vec![
        Key::new("a", "A", 0.0, 0.0),
        Key::new("a", "A", 3.0, 1.0).with_colors(Some("#00ff00"), None),
        Key::new("b", "B", 1.0, 0.0),
    ];
    let theme = Theme::default();
    let mut overlay = OverlayRenderer::create(MockCtx::default(), Vec::new(), theme.clone());
    overlay.load_keys(keys, None);
    assert_eq!(overlay.keys().iter().filter(|k| k.id == "a").count(), 2);

    assert!(overlay.update_key("a", true));
    let pressed_fill = color_or(Some(&theme.key_pressed), "#7b68ee");
    let is_pressed = |id: &str| overlay.is_pressed(id);
    for key in overlay.keys() {
        let style = resolve_style(key, is_pressed(&key.id), overlay.theme());
        if key.id == "a" {
            assert_eq!(style.fill, pressed_fill, "{key:?}");
        } else {
            assert_ne!(style.fill, pressed_fill, "{key:?}");
        }
    }

    overlay.update_key("a", false);
    assert!(overlay.keys().iter().all(|k| !overlay.is_pressed(&k.id)));
}
