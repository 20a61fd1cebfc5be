// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::ConsoleColor;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Code used when a color name is not in the palette.
pub const DEFAULT_PALETTE_CODE: u8 = 7;

/// Named colors accepted by `set_prompt_color` / `set_input_color`. Names are case
/// insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PaletteColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkCyan,
    DarkRed,
    DarkMagenta,
    DarkYellow,
    Gray,
    Blue,
    Green,
    Cyan,
    Red,
    Magenta,
    Yellow,
    White,
}

impl PaletteColor {
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            PaletteColor::Black => 0,
            PaletteColor::DarkBlue => 1,
            PaletteColor::DarkGreen => 2,
            PaletteColor::DarkCyan => 3,
            PaletteColor::DarkRed => 4,
            PaletteColor::DarkMagenta => 5,
            PaletteColor::DarkYellow => 6,
            PaletteColor::Gray => 7,
            PaletteColor::Blue => 9,
            PaletteColor::Green => 10,
            PaletteColor::Cyan => 11,
            PaletteColor::Red => 12,
            PaletteColor::Magenta => 13,
            PaletteColor::Yellow => 14,
            PaletteColor::White => 15,
        }
    }
}

/// 4-bit code for a palette name, [`DEFAULT_PALETTE_CODE`] when it is unknown.
#[must_use]
pub fn palette_code(name: &str) -> u8 {
    PaletteColor::from_str(name.trim()).map_or(DEFAULT_PALETTE_CODE, PaletteColor::code)
}

#[must_use]
pub fn palette_color(name: &str) -> ConsoleColor { ConsoleColor::new(palette_code(name)) }
