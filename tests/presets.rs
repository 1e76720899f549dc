use key_overlay::geometry::bounding_size;
use key_overlay::presets::{builtin_presets, find_preset, FULL_QWERTY};
use key_overlay::settings::Theme;

#[test]
fn six_presets_in_display_order() {
    let names: Vec<&str> = builtin_presets().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Full Keyboard (QWERTY)",
            "No F-Keys (QWERTY)",
            "Left Half (QWERTY)",
            "Gaming / WASD",
            "Numpad",
            "Full Keyboard (AZERTY)",
        ]
    );
}

#[test]
fn every_preset_has_keys_and_valid_spans() {
    for preset in builtin_presets() {
        assert!(!preset.keys.is_empty(), "{}", preset.name);
        for key in &preset.keys {
            assert!(key.w >= 0.5 && key.h >= 0.5, "{} {}", preset.name, key.id);
            assert!(key.x >= 0.0 && key.y >= 0.0, "{} {}", preset.name, key.id);
        }
    }
}

#[test]
fn qwerty_ids_match_capture_names() {
    let preset = find_preset(FULL_QWERTY).unwrap();
    for id in ["esc", "f1", "a", "shift_l", "shift_r", "ctrl_l", "space", "enter", "mouse_left"] {
        assert!(preset.keys.iter().any(|k| k.id == id), "missing {id}");
    }
}

#[test]
fn qwerty_bounding_width_is_alpha_independent() {
    let preset = find_preset(FULL_QWERTY).unwrap();
    let base = Theme::default();
    let faint = Theme {
        overlay_alpha: 0.3,
        ..Theme::default()
    };
    assert_eq!(
        bounding_size(&preset.keys, &base).0,
        bounding_size(&preset.keys, &faint).0
    );
}
