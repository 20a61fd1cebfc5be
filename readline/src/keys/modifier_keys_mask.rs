// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::KeyModifiers;

/// Modifier flags of a chord. Terminals report Meta as Alt, so `alt_key_state` is the
/// Meta modifier of inputrc style key descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierKeysMask {
    pub shift_key_state: KeyState,
    pub ctrl_key_state: KeyState,
    pub alt_key_state: KeyState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyState {
    Pressed,
    #[default]
    NotPressed,
}

impl From<bool> for KeyState {
    fn from(pressed: bool) -> Self {
        if pressed {
            KeyState::Pressed
        } else {
            KeyState::NotPressed
        }
    }
}

impl ModifierKeysMask {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { *self == Self::default() }

    #[must_use]
    pub fn is_shift(&self) -> bool { self.shift_key_state == KeyState::Pressed }

    #[must_use]
    pub fn is_ctrl(&self) -> bool { self.ctrl_key_state == KeyState::Pressed }

    #[must_use]
    pub fn is_alt(&self) -> bool { self.alt_key_state == KeyState::Pressed }
}

impl From<KeyModifiers> for ModifierKeysMask {
    /// `intersects` is used since crossterm may report extra bits (super, hyper) that
    /// have no inputrc spelling.
    fn from(other: KeyModifiers) -> ModifierKeysMask {
        ModifierKeysMask {
            shift_key_state: other.intersects(KeyModifiers::SHIFT).into(),
            ctrl_key_state: other.intersects(KeyModifiers::CONTROL).into(),
            alt_key_state: other.intersects(KeyModifiers::ALT).into(),
        }
    }
}
