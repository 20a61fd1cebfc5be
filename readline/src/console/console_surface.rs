// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{KeyPress, ReadlineResult, TextStyle, ok};
use std::fmt::Debug;

/// Zero based terminal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos {
    pub col: u16,
    pub row: u16,
}

#[must_use]
pub const fn pos(col: u16, row: u16) -> Pos { Pos { col, row } }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub cols: u16,
    pub rows: u16,
}

#[must_use]
pub const fn size(cols: u16, rows: u16) -> Size { Size { cols, rows } }

/// Rectangle with exclusive `right` and `bottom` edges. Implementations clip it to the
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub left: u16,
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
}

impl Rect {
    #[must_use]
    pub fn clipped_to(self, window: Size) -> Rect {
        Rect {
            left: self.left.min(window.cols),
            top: self.top.min(window.rows),
            right: self.right.min(window.cols),
            bottom: self.bottom.min(window.rows),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.left >= self.right || self.top >= self.bottom }
}

/// What one blocking read produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleEvent {
    Key(KeyPress),
    /// The platform abort signal (Ctrl+C) interrupted the read.
    Abort,
}

/// Terminal primitives the engine is written against. Coordinates are zero based and
/// every write goes through [`ConsoleSurface::write_scrolling`], which reports how
/// many rows the window scrolled so that the render engine can keep its saved prompt
/// coordinates valid.
pub trait ConsoleSurface: Debug + Send {
    /// # Errors
    ///
    /// Returns an error if the terminal can't be queried.
    fn pos(&mut self) -> ReadlineResult<Pos>;

    /// # Errors
    ///
    /// Returns an error if the cursor can't be moved.
    fn set_pos(&mut self, pos: Pos) -> ReadlineResult<()>;

    /// # Errors
    ///
    /// Returns an error if the terminal can't be queried.
    fn size(&mut self) -> ReadlineResult<Size>;

    /// Write `text` at the cursor, wrapping at the right edge, and return the number
    /// of rows the window scrolled to make room for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn write_scrolling(&mut self, text: &str, style: TextStyle) -> ReadlineResult<u16>;

    /// Blank out a rectangle. The cursor does not move.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn clear_rect(&mut self, rect: Rect) -> ReadlineResult<()>;

    /// Scroll the visible window by `lines` (negative is up). Terminals whose
    /// viewport follows the output treat this as a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn scroll_window(&mut self, lines: i32) -> ReadlineResult<()>;

    /// Move the contents of `rect` by `(dx, dy)` (negative `dy` is up).
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn scroll_rect(&mut self, rect: Rect, dx: i32, dy: i32) -> ReadlineResult<()>;

    /// Show or hide the cursor. `size` is a percentage of the cell, 100 is a block.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn set_cursor(&mut self, visible: bool, size: u8) -> ReadlineResult<()>;

    /// Non blocking check for pending input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input can't be polled.
    fn peek(&mut self) -> ReadlineResult<bool>;

    /// Block until one key event (or the abort signal) arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the input can't be read.
    fn read_event(&mut self) -> ReadlineResult<ConsoleEvent>;

    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn bell(&mut self) -> ReadlineResult<()>;

    /// Clear from the cursor to the end of the window in one operation. Returns
    /// `false` when the surface does not offer this, and the caller falls back to
    /// [`ConsoleSurface::clear_rect`].
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal can't be written to.
    fn try_clear_to_end_of_window(&mut self) -> ReadlineResult<bool> { ok!(false) }

    /// `false` only for [`crate::UninitializedConsole`].
    fn is_attached(&self) -> bool { true }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rect_clipping() {
        let rect = Rect {
            left: 3,
            top: 1,
            right: 200,
            bottom: 90,
        };
        let clipped = rect.clipped_to(size(80, 24));
        assert_eq!(
            clipped,
            Rect {
                left: 3,
                top: 1,
                right: 80,
                bottom: 24
            }
        );
        assert!(!clipped.is_empty());
        assert!(Rect::default().is_empty());
    }
}
