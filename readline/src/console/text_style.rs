// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::style::Color;

/// A 4-bit console color code (bit 0 blue, bit 1 green, bit 2 red, bit 3 intensity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConsoleColor(u8);

impl ConsoleColor {
    pub const BLACK: ConsoleColor = ConsoleColor(0);
    pub const GRAY: ConsoleColor = ConsoleColor(7);

    /// Only the low 4 bits are kept.
    #[must_use]
    pub const fn new(code: u8) -> Self { Self(code & 0x0F) }

    #[must_use]
    pub const fn code(self) -> u8 { self.0 }
}

impl From<ConsoleColor> for Color {
    fn from(color: ConsoleColor) -> Self {
        match color.code() {
            0 => Color::Black,
            1 => Color::DarkBlue,
            2 => Color::DarkGreen,
            3 => Color::DarkCyan,
            4 => Color::DarkRed,
            5 => Color::DarkMagenta,
            6 => Color::DarkYellow,
            7 => Color::Grey,
            8 => Color::DarkGrey,
            9 => Color::Blue,
            10 => Color::Green,
            11 => Color::Cyan,
            12 => Color::Red,
            13 => Color::Magenta,
            14 => Color::Yellow,
            _ => Color::White,
        }
    }
}

/// Colors for one write. `None` leaves the terminal's current color alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub fg: Option<ConsoleColor>,
    pub bg: Option<ConsoleColor>,
}

impl TextStyle {
    #[must_use]
    pub fn fg(color: Option<ConsoleColor>) -> Self { Self { fg: color, bg: None } }

    /// Black on gray, the inverse of the default console colors.
    #[must_use]
    pub fn default_selection() -> Self {
        Self {
            fg: Some(ConsoleColor::BLACK),
            bg: Some(ConsoleColor::GRAY),
        }
    }
}
