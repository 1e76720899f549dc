use key_overlay::editor::{KeyPatch, LayoutEditor};
use key_overlay::layout::Key;
use key_overlay::presets::builtin_presets;
use key_overlay::settings::Theme;

fn editor_with(keys: &[Key]) -> LayoutEditor {
    let mut editor = LayoutEditor::new(Theme::default());
    editor.load_keys(keys);
    editor
}

#[test]
fn get_keys_is_a_deep_copy() {
    let original = builtin_presets()[0].keys.clone();
    let mut editor = editor_with(&original);
    let mut copy = editor.get_keys();
    assert_eq!(copy, original);
    copy[0].label = "changed".into();
    assert_eq!(editor.keys()[0].label, original[0].label);

    editor.pointer_down(15.0, 15.0);
    editor.update_selected(KeyPatch {
        label: Some("edited".into()),
        ..KeyPatch::default()
    });
    assert_eq!(original[0].label, builtin_presets()[0].keys[0].label);
}

#[test]
fn delete_removes_exactly_one() {
    let keys = vec![
        Key::new("a", "A", 0.0, 0.0),
        Key::new("b", "B", 1.0, 0.0),
        Key::new("c", "C", 2.0, 0.0),
    ];
    let mut editor = editor_with(&keys);
    // x = 10 + 1 * 48 + 5 lands inside "b".
    editor.pointer_down(63.0, 15.0);
    editor.pointer_up();
    let removed = editor.delete_selected().expect("selection");
    assert_eq!(removed.id, "b");
    assert_eq!(editor.keys().len(), 2);
    assert!(editor.selected().is_none());
}

#[test]
fn delete_without_selection_is_noop() {
    let keys = vec![Key::new("a", "A", 0.0, 0.0)];
    let mut editor = editor_with(&keys);
    assert!(editor.delete_selected().is_none());
    assert_eq!(editor.keys(), keys.as_slice());
}

#[test]
fn add_key_twice_gives_distinct_ids() {
    let mut editor = editor_with(&[]);
    let first = editor.add_key().id.clone();
    let second = editor.add_key().id.clone();
    assert_ne!(first, second);
    assert_eq!(editor.keys().len(), 2);
    assert_eq!(editor.selected().map(|k| k.id.clone()), Some(second));
}

#[test]
fn update_without_selection_is_noop() {
    let keys = vec![Key::new("a", "A", 0.0, 0.0)];
    let mut editor = editor_with(&keys);
    let changed = editor.update_selected(KeyPatch {
        label: Some("Z".into()),
        ..KeyPatch::default()
    });
    assert!(!changed);
    assert_eq!(editor.keys(), keys.as_slice());
}

#[test]
fn clicking_empty_space_clears_selection() {
    let keys = vec![Key::new("a", "A", 0.0, 0.0)];
    let mut editor = editor_with(&keys);
    editor.pointer_down(15.0, 15.0);
    editor.pointer_up();
    assert!(editor.selected().is_some());
    editor.pointer_down(800.0, 400.0);
    assert!(editor.selected().is_none());
}
