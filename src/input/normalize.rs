use rdev::{Button, Key};

/// A raw, platform-level transition as delivered by a capture backend.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Key {
        key: Key,
        pressed: bool,
        /// Character the platform reported for a key-down, if any.
        typed: Option<String>,
    },
    Button {
        button: Button,
        pressed: bool,
    },
}

/// A normalised `(id, pressed)` transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTransition {
    pub id: String,
    pub pressed: bool,
}

impl KeyTransition {
    pub fn new(id: impl Into<String>, pressed: bool) -> Self {
        Self {
            id: id.into(),
            pressed,
        }
    }
}

/// Canonical id of a pointer button.
pub fn button_id(button: Button) -> String {
    match button {
        Button::Left => "mouse_left".into(),
        Button::Right => "mouse_right".into(),
        Button::Middle => "mouse_middle".into(),
        Button::Unknown(code) => format!("mouse_button{code}"),
    }
}

/// Platform-independent name for keys that do not produce a character.
pub fn named_key_id(key: Key) -> Option<&'static str> {
    let id = match key {
        Key::Escape => "esc",
        Key::F1 => "f1",
        Key::F2 => "f2",
        Key::F3 => "f3",
        Key::F4 => "f4",
        Key::F5 => "f5",
        Key::F6 => "f6",
        Key::F7 => "f7",
        Key::F8 => "f8",
        Key::F9 => "f9",
        Key::F10 => "f10",
        Key::F11 => "f11",
        Key::F12 => "f12",
        Key::PrintScreen => "print_screen",
        Key::ScrollLock => "scroll_lock",
        Key::Pause => "pause",
        Key::Insert => "insert",
        Key::Delete => "delete",
        Key::Home => "home",
        Key::End => "end",
        Key::PageUp => "page_up",
        Key::PageDown => "page_down",
        Key::UpArrow => "up",
        Key::DownArrow => "down",
        Key::LeftArrow => "left",
        Key::RightArrow => "right",
        Key::Backspace => "backspace",
        Key::Tab => "tab",
        Key::CapsLock => "caps_lock",
        Key::Return => "enter",
        Key::Space => "space",
        Key::ShiftLeft => "shift_l",
        Key::ShiftRight => "shift_r",
        Key::ControlLeft => "ctrl_l",
        Key::ControlRight => "ctrl_r",
        Key::Alt => "alt_l",
        Key::AltGr => "alt_gr",
        Key::MetaLeft => "cmd",
        Key::MetaRight => "cmd_r",
        Key::NumLock => "num_lock",
        Key::Kp0 => "kp0",
        Key::Kp1 => "kp1",
        Key::Kp2 => "kp2",
        Key::Kp3 => "kp3",
        Key::Kp4 => "kp4",
        Key::Kp5 => "kp5",
        Key::Kp6 => "kp6",
        Key::Kp7 => "kp7",
        Key::Kp8 => "kp8",
        Key::Kp9 => "kp9",
        Key::KpDivide => "kp_divide",
        Key::KpMultiply => "kp_multiply",
        Key::KpMinus => "kp_subtract",
        Key::KpPlus => "kp_add",
        Key::KpReturn => "kp_enter",
        Key::KpDelete => "kp_decimal",
        Key::Function => "fn",
        _ => return None,
    };
    Some(id)
}

/// US-layout character of a character key.
pub fn us_char(key: Key) -> Option<char> {
    let c = match key {
        Key::KeyA => 'a',
        Key::KeyB => 'b',
        Key::KeyC => 'c',
        Key::KeyD => 'd',
        Key::KeyE => 'e',
        Key::KeyF => 'f',
        Key::KeyG => 'g',
        Key::KeyH => 'h',
        Key::KeyI => 'i',
        Key::KeyJ => 'j',
        Key::KeyK => 'k',
        Key::KeyL => 'l',
        Key::KeyM => 'm',
        Key::KeyN => 'n',
        Key::KeyO => 'o',
        Key::KeyP => 'p',
        Key::KeyQ => 'q',
        Key::KeyR => 'r',
        Key::KeyS => 's',
        Key::KeyT => 't',
        Key::KeyU => 'u',
        Key::KeyV => 'v',
        Key::KeyW => 'w',
        Key::KeyX => 'x',
        Key::KeyY => 'y',
        Key::KeyZ => 'z',
        Key::Num0 => '0',
        Key::Num1 => '1',
        Key::Num2 => '2',
        Key::Num3 => '3',
        Key::Num4 => '4',
        Key::Num5 => '5',
        Key::Num6 => '6',
        Key::Num7 => '7',
        Key::Num8 => '8',
        Key::Num9 => '9',
        Key::BackQuote => '`',
        Key::Minus => '-',
        Key::Equal => '=',
        Key::LeftBracket => '[',
        Key::RightBracket => ']',
        Key::BackSlash | Key::IntlBackslash => '\\',
        Key::SemiColon => ';',
        Key::Quote => '\'',
        Key::Comma => ',',
        Key::Dot => '.',
        Key::Slash => '/',
        _ => return None,
    };
    Some(c)
}

/// Lowercased single printable character, or `None` for control characters,
/// whitespace and multi-character strings.
fn printable_char(typed: &str) -> Option<String> {
    let mut chars = typed.chars();
    let c = chars.next()?;
    if chars.next().is_some() || c.is_control() || c.is_whitespace() {
        return None;
    }
    Some(c.to_lowercase().collect())
}

/// Stateful normaliser owned by one capture worker.
///
/// The id chosen on key-down is remembered per physical key so the matching
/// key-up reports the same id even when the platform omits the character on
/// release or a modifier changed in between.
#[derive(Debug, Default)]
pub struct KeyNormalizer {
    held: Vec<(Key, String)>,
}

impl KeyNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, raw: RawInput) -> Option<KeyTransition> {
        match raw {
            RawInput::Button { button, pressed } => {
                Some(KeyTransition::new(button_id(button), pressed))
            }
            RawInput::Key {
                key,
                pressed: true,
                typed,
            } => {
                let id = key_down_id(key, typed.as_deref())?;
                self.held.retain(|(held, _)| *held != key);
                self.held.push((key, id.clone()));
                Some(KeyTransition::new(id, true))
            }
            RawInput::Key {
                key,
                pressed: false,
                ..
            } => {
                let id = match self.held.iter().position(|(held, _)| *held == key) {
                    Some(index) => self.held.swap_remove(index).1,
                    None => key_down_id(key, None)?,
                };
                Some(KeyTransition::new(id, false))
            }
        }
    }
}

fn key_down_id(key: Key, typed: Option<&str>) -> Option<String> {
    if let Some(name) = named_key_id(key) {
        return Some(name.to_string());
    }
    let fallback = us_char(key);
    if fallback.is_none() {
        tracing::trace!(?key, "ignoring key without canonical id");
        return None;
    }
    typed
        .and_then(printable_char)
        .or_else(|| fallback.map(String::from))
}
