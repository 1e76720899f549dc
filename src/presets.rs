//! Built-in layouts. Key ids are the ones input capture produces, so a
//! preset lights up without further mapping.

use crate::layout::{Key, LayoutConfig};
use once_cell::sync::Lazy;

const MOUSE_FILL: &str = "#1e3a5f";
const MOUSE_TEXT: &str = "#aaddff";
const HIGHLIGHT_FILL: &str = "#7b68ee";

pub const FULL_QWERTY: &str = "Full Keyboard (QWERTY)";

static PRESETS: Lazy<Vec<LayoutConfig>> = Lazy::new(|| {
    let presets = vec![
        LayoutConfig::new(FULL_QWERTY, "qwerty", qwerty_full()),
        LayoutConfig::new("No F-Keys (QWERTY)", "qwerty", qwerty_no_fkeys()),
        LayoutConfig::new("Left Half (QWERTY)", "qwerty", qwerty_left_half()),
        LayoutConfig::new("Gaming / WASD", "qwerty", gaming_wasd()),
        LayoutConfig::new("Numpad", "qwerty", numpad()),
        LayoutConfig::new("Full Keyboard (AZERTY)", "azerty", azerty_full()),
    ];
    for preset in &presets {
        tracing::debug!(name = %preset.name, keys = preset.keys.len(), "registered preset");
    }
    presets
});

/// All presets in display order.
pub fn builtin_presets() -> &'static [LayoutConfig] {
    &PRESETS
}

pub fn find_preset(name: &str) -> Option<&'static LayoutConfig> {
    PRESETS.iter().find(|p| p.name == name)
}

fn row(keys: &mut Vec<Key>, y: f32, start_x: f32, entries: &[(&str, &str)]) -> f32 {
    let mut x = start_x;
    for (id, label) in entries {
        keys.push(Key::new(*id, *label, x, y));
        x += 1.0;
    }
    x
}

fn function_row(keys: &mut Vec<Key>) {
    row(
        keys,
        0.0,
        0.0,
        &[
            ("esc", "Esc"),
            ("f1", "F1"),
            ("f2", "F2"),
            ("f3", "F3"),
            ("f4", "F4"),
            ("f5", "F5"),
            ("f6", "F6"),
            ("f7", "F7"),
            ("f8", "F8"),
            ("f9", "F9"),
            ("f10", "F10"),
            ("f11", "F11"),
            ("f12", "F12"),
            ("print_screen", "Prt"),
            ("insert", "Ins"),
            ("delete", "Del"),
        ],
    );
}

fn bottom_row(keys: &mut Vec<Key>) {
    for (id, label, x, w) in [
        ("ctrl_l", "Ctrl", 0.0, 1.25),
        ("cmd", "Win", 1.25, 1.25),
        ("alt_l", "Alt", 2.5, 1.25),
        ("space", "Space", 3.75, 6.25),
        ("alt_gr", "AltGr", 10.0, 1.25),
        ("cmd_r", "Win", 11.25, 1.25),
        ("ctrl_r", "Ctrl", 12.5, 1.25),
    ] {
        keys.push(Key::new(id, label, x, 5.0).sized(w, 1.0));
    }
}

fn mouse_buttons(keys: &mut Vec<Key>) {
    for (id, label, x) in [
        ("mouse_left", "LMB", 0.0),
        ("mouse_middle", "MMB", 1.6),
        ("mouse_right", "RMB", 3.2),
    ] {
        keys.push(
            Key::new(id, label, x, 7.0)
                .sized(1.5, 1.5)
                .with_colors(Some(MOUSE_FILL), Some(MOUSE_TEXT)),
        );
    }
}

fn qwerty_full() -> Vec<Key> {
    let mut keys = Vec::new();
    function_row(&mut keys);

    let x = row(
        &mut keys,
        1.0,
        0.0,
        &[
            ("`", "`"),
            ("1", "1"),
            ("2", "2"),
            ("3", "3"),
            ("4", "4"),
            ("5", "5"),
            ("6", "6"),
            ("7", "7"),
            ("8", "8"),
            ("9", "9"),
            ("0", "0"),
            ("-", "-"),
            ("=", "="),
        ],
    );
    keys.push(Key::new("backspace", "Bksp", x, 1.0).sized(2.0, 1.0));

    keys.push(Key::new("tab", "Tab", 0.0, 2.0).sized(1.5, 1.0));
    let x = row(
        &mut keys,
        2.0,
        1.5,
        &[
            ("q", "Q"),
            ("w", "W"),
            ("e", "E"),
            ("r", "R"),
            ("t", "T"),
            ("y", "Y"),
            ("u", "U"),
            ("i", "I"),
            ("o", "O"),
            ("p", "P"),
            ("[", "["),
            ("]", "]"),
        ],
    );
    keys.push(Key::new("\\", "\\", x, 2.0).sized(1.5, 1.0));

    keys.push(Key::new("caps_lock", "Caps", 0.0, 3.0).sized(1.75, 1.0));
    let x = row(
        &mut keys,
        3.0,
        1.75,
        &[
            ("a", "A"),
            ("s", "S"),
            ("d", "D"),
            ("f", "F"),
            ("g", "G"),
            ("h", "H"),
            ("j", "J"),
            ("k", "K"),
            ("l", "L"),
            (";", ";"),
            ("'", "'"),
        ],
    );
    keys.push(Key::new("enter", "Enter", x, 3.0).sized(2.25, 1.0));

    keys.push(Key::new("shift_l", "Shift", 0.0, 4.0).sized(2.25, 1.0));
    let x = row(
        &mut keys,
        4.0,
        2.25,
        &[
            ("z", "Z"),
            ("x", "X"),
            ("c", "C"),
            ("v", "V"),
            ("b", "B"),
            ("n", "N"),
            ("m", "M"),
            (",", ","),
            (".", "."),
            ("/", "/"),
        ],
    );
    keys.push(Key::new("shift_r", "Shift", x, 4.0).sized(2.75, 1.0));

    bottom_row(&mut keys);
    mouse_buttons(&mut keys);
    keys
}

fn qwerty_no_fkeys() -> Vec<Key> {
    qwerty_full()
        .into_iter()
        .filter(|k| k.y != 0.0 || k.id == "esc")
        .collect()
}

fn keep(ids: &[&str]) -> Vec<Key> {
    qwerty_full()
        .into_iter()
        .filter(|k| ids.contains(&k.id.as_str()))
        .collect()
}

fn qwerty_left_half() -> Vec<Key> {
    keep(&[
        "esc", "f1", "f2", "f3", "f4", "f5", "`", "1", "2", "3", "4", "5", "6", "tab", "q", "w",
        "e", "r", "t", "caps_lock", "a", "s", "d", "f", "g", "shift_l", "z", "x", "c", "v", "b",
        "ctrl_l", "cmd", "alt_l", "space", "mouse_left", "mouse_middle", "mouse_right",
    ])
}

fn gaming_wasd() -> Vec<Key> {
    let mut keys = keep(&[
        "esc", "1", "2", "3", "4", "5", "tab", "q", "w", "e", "r", "caps_lock", "a", "s", "d",
        "f", "shift_l", "z", "x", "c", "v", "ctrl_l", "alt_l", "space", "mouse_left",
        "mouse_middle", "mouse_right",
    ]);
    for key in keys
        .iter_mut()
        .filter(|k| matches!(k.id.as_str(), "w" | "a" | "s" | "d"))
    {
        key.color = Some(HIGHLIGHT_FILL.into());
    }
    keys
}

fn numpad() -> Vec<Key> {
    let mut keys = Vec::new();
    let rows: [&[(&str, &str, f32, f32)]; 5] = [
        &[
            ("num_lock", "Num", 0.0, 1.0),
            ("kp_divide", "/", 1.0, 1.0),
            ("kp_multiply", "*", 2.0, 1.0),
            ("kp_subtract", "-", 3.0, 1.0),
        ],
        &[("kp7", "7", 0.0, 1.0), ("kp8", "8", 1.0, 1.0), ("kp9", "9", 2.0, 1.0)],
        &[("kp4", "4", 0.0, 1.0), ("kp5", "5", 1.0, 1.0), ("kp6", "6", 2.0, 1.0)],
        &[("kp1", "1", 0.0, 1.0), ("kp2", "2", 1.0, 1.0), ("kp3", "3", 2.0, 1.0)],
        &[("kp0", "0", 0.0, 2.0), ("kp_decimal", ".", 2.0, 1.0)],
    ];
    for (y, entries) in rows.iter().enumerate() {
        for (id, label, x, w) in entries.iter() {
            keys.push(Key::new(*id, *label, *x, y as f32).sized(*w, 1.0));
        }
    }
    keys.push(Key::new("kp_enter", "Ent", 3.0, 1.0).sized(1.0, 2.0));
    keys
}

/// French AZERTY. Character keys carry the character the layout types.
fn azerty_full() -> Vec<Key> {
    let mut keys = Vec::new();
    function_row(&mut keys);

    let x = row(
        &mut keys,
        1.0,
        0.0,
        &[
            ("²", "²"),
            ("&", "&"),
            ("é", "é"),
            ("\"", "\""),
            ("'", "'"),
            ("(", "("),
            ("-", "-"),
            ("è", "è"),
            ("_", "_"),
            ("ç", "ç"),
            ("à", "à"),
            (")", ")"),
            ("=", "="),
        ],
    );
    keys.push(Key::new("backspace", "Bksp", x, 1.0).sized(2.0, 1.0));

    keys.push(Key::new("tab", "Tab", 0.0, 2.0).sized(1.5, 1.0));
    let x = row(
        &mut keys,
        2.0,
        1.5,
        &[
            ("a", "A"),
            ("z", "Z"),
            ("e", "E"),
            ("r", "R"),
            ("t", "T"),
            ("y", "Y"),
            ("u", "U"),
            ("i", "I"),
            ("o", "O"),
            ("p", "P"),
            ("^", "^"),
            ("$", "$"),
        ],
    );
    keys.push(Key::new("*", "*", x, 2.0).sized(1.5, 1.0));

    keys.push(Key::new("caps_lock", "Caps", 0.0, 3.0).sized(1.75, 1.0));
    let x = row(
        &mut keys,
        3.0,
        1.75,
        &[
            ("q", "Q"),
            ("s", "S"),
            ("d", "D"),
            ("f", "F"),
            ("g", "G"),
            ("h", "H"),
            ("j", "J"),
            ("k", "K"),
            ("l", "L"),
            ("m", "M"),
            ("ù", "ù"),
        ],
    );
    keys.push(Key::new("enter", "Enter", x, 3.0).sized(2.25, 1.0));

    keys.push(Key::new("shift_l", "Shift", 0.0, 4.0).sized(2.25, 1.0));
    let x = row(
        &mut keys,
        4.0,
        2.25,
        &[
            ("w", "W"),
            ("x", "X"),
            ("c", "C"),
            ("v", "V"),
            ("b", "B"),
            ("n", "N"),
            (",", ","),
            (";", ";"),
            (":", ":"),
            ("!", "!"),
        ],
    );
    keys.push(Key::new("shift_r", "Shift", x, 4.0).sized(2.75, 1.0));

    bottom_row(&mut keys);
    mouse_buttons(&mut keys);
    keys
}
