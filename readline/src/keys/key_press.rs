// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{KeyState, ModifierKeysMask};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use std::fmt::{self, Display, Formatter};
use strum_macros::{Display as StrumDisplay, EnumString};

/// Build a [`KeyPress`] without spelling out the enum. The modifier forms go through
/// [`KeyPress::new`] so the result is normalized.
///
/// ```
/// use r3bl_readline::{keypress, Key, KeyPress, ModifierKeysMask, SpecialKey};
///
/// let a = keypress!(@char 'a');
/// let ctrl_a = keypress!(@char ModifierKeysMask::new().with_ctrl(), 'a');
/// let enter = keypress!(@special SpecialKey::Enter);
/// assert_eq!(a, KeyPress::Plain { key: Key::Character('a') });
/// assert_ne!(a, ctrl_a);
/// assert_eq!(enter.to_string(), "Return");
/// ```
#[macro_export]
macro_rules! keypress {
    (@char $arg_char : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::Character($arg_char),
        }
    };

    (@char $arg_modifiers : expr, $arg_char : expr) => {
        $crate::KeyPress::new($crate::Key::Character($arg_char), $arg_modifiers)
    };

    (@special $arg_special : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::SpecialKey($arg_special),
        }
    };

    (@special $arg_modifiers : expr, $arg_special : expr) => {
        $crate::KeyPress::new($crate::Key::SpecialKey($arg_special), $arg_modifiers)
    };

    (@fn $arg_function : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::FunctionKey($arg_function),
        }
    };
}

/// One input event: a key plus modifier flags. This is the unit of key binding (a
/// chord). Always build chords with modifiers via [`KeyPress::new`] (or
/// [`crate::keypress`!]) so that equal chords hash equally.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Copy)]
pub enum KeyPress {
    Plain { key: Key },
    WithModifiers { key: Key, mask: ModifierKeysMask },
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Copy)]
pub enum Key {
    Character(char),
    SpecialKey(SpecialKey),
    FunctionKey(FunctionKey),
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Copy, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum FunctionKey {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

/// The string forms are the inputrc key names. [`Display`] writes the first one.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Copy, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum SpecialKey {
    #[strum(to_string = "BackSpace", serialize = "Rubout")]
    Backspace,
    #[strum(to_string = "Return", serialize = "Enter", serialize = "RET")]
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    /// Shift + Tab.
    #[strum(to_string = "BackTab")]
    BackTab,
    #[strum(to_string = "Delete", serialize = "Del")]
    Delete,
    Insert,
    #[strum(to_string = "Escape", serialize = "Esc")]
    Esc,
}

impl KeyPress {
    /// Normalizes the chord:
    /// - Shift on a character is folded into the character itself.
    /// - Control on a character implies its lower case form.
    /// - Shift + Tab is [`SpecialKey::BackTab`].
    /// - An empty mask is [`KeyPress::Plain`].
    #[must_use]
    pub fn new(key: Key, mut mask: ModifierKeysMask) -> Self {
        let key = match key {
            Key::Character(ch) => {
                mask.shift_key_state = KeyState::NotPressed;
                if mask.is_ctrl() {
                    Key::Character(ch.to_ascii_lowercase())
                } else {
                    Key::Character(ch)
                }
            }
            Key::SpecialKey(SpecialKey::Tab) if mask.is_shift() => {
                mask.shift_key_state = KeyState::NotPressed;
                Key::SpecialKey(SpecialKey::BackTab)
            }
            Key::SpecialKey(SpecialKey::BackTab) => {
                mask.shift_key_state = KeyState::NotPressed;
                key
            }
            _ => key,
        };

        if mask.is_empty() {
            KeyPress::Plain { key }
        } else {
            KeyPress::WithModifiers { key, mask }
        }
    }

    #[must_use]
    pub fn key(&self) -> Key {
        match self {
            KeyPress::Plain { key } | KeyPress::WithModifiers { key, .. } => *key,
        }
    }

    #[must_use]
    pub fn mask(&self) -> ModifierKeysMask {
        match self {
            KeyPress::Plain { .. } => ModifierKeysMask::default(),
            KeyPress::WithModifiers { mask, .. } => *mask,
        }
    }

    /// The character to insert for this key press, if it is a plain printable one.
    #[must_use]
    pub fn printable_char(&self) -> Option<char> {
        match self {
            KeyPress::Plain {
                key: Key::Character(ch),
            } if !ch.is_control() => Some(*ch),
            _ => None,
        }
    }

    /// The chord delivered when an interrupt tap is swallowed.
    #[must_use]
    pub fn ctrl_c() -> Self { keypress!(@char ModifierKeysMask::new().with_ctrl(), 'c') }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Key::Character(' ') => write!(f, "Space"),
            Key::Character(ch) => write!(f, "{ch}"),
            Key::SpecialKey(SpecialKey::BackTab) => write!(f, "Shift-Tab"),
            Key::SpecialKey(special_key) => write!(f, "{special_key}"),
            Key::FunctionKey(function_key) => write!(f, "{function_key}"),
        }
    }
}

/// Writes the canonical key description, which [`crate::parse_key_description`]
/// reads back.
impl Display for KeyPress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mask = self.mask();
        if mask.is_ctrl() {
            write!(f, "Control-")?;
        }
        if mask.is_alt() {
            write!(f, "Meta-")?;
        }
        if mask.is_shift() {
            write!(f, "Shift-")?;
        }
        write!(f, "{}", self.key())
    }
}

pub mod convert_key_event {
    use super::{FunctionKey, Key, KeyCode, KeyEvent, KeyEventKind, KeyPress,
                ModifierKeysMask, SpecialKey};

    impl TryFrom<KeyEvent> for KeyPress {
        type Error = ();

        /// Only [`KeyEventKind::Press`] (and repeat) events turn into key presses.
        fn try_from(key_event: KeyEvent) -> Result<Self, Self::Error> {
            if key_event.kind == KeyEventKind::Release {
                return Err(());
            }
            let key = copy_code_from_key_event(&key_event).ok_or(())?;
            Ok(KeyPress::new(key, ModifierKeysMask::from(key_event.modifiers)))
        }
    }

    fn match_fn_key(fn_key: u8) -> Option<Key> {
        let it = match fn_key {
            1 => FunctionKey::F1,
            2 => FunctionKey::F2,
            3 => FunctionKey::F3,
            4 => FunctionKey::F4,
            5 => FunctionKey::F5,
            6 => FunctionKey::F6,
            7 => FunctionKey::F7,
            8 => FunctionKey::F8,
            9 => FunctionKey::F9,
            10 => FunctionKey::F10,
            11 => FunctionKey::F11,
            12 => FunctionKey::F12,
            _ => return None,
        };
        Some(Key::FunctionKey(it))
    }

    #[must_use]
    pub fn copy_code_from_key_event(key_event: &KeyEvent) -> Option<Key> {
        type KC = KeyCode;
        let special = |it: SpecialKey| Some(Key::SpecialKey(it));
        match key_event.code {
            KC::Backspace => special(SpecialKey::Backspace),
            KC::Enter => special(SpecialKey::Enter),
            KC::Left => special(SpecialKey::Left),
            KC::Right => special(SpecialKey::Right),
            KC::Up => special(SpecialKey::Up),
            KC::Down => special(SpecialKey::Down),
            KC::Home => special(SpecialKey::Home),
            KC::End => special(SpecialKey::End),
            KC::PageUp => special(SpecialKey::PageUp),
            KC::PageDown => special(SpecialKey::PageDown),
            KC::Tab => special(SpecialKey::Tab),
            KC::BackTab => special(SpecialKey::BackTab),
            KC::Delete => special(SpecialKey::Delete),
            KC::Insert => special(SpecialKey::Insert),
            KC::Esc => special(SpecialKey::Esc),
            KC::F(fn_key) => match_fn_key(fn_key),
            KC::Char(character) => Some(Key::Character(character)),
            _ => None,
        }
    }
}
