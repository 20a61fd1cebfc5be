// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ConsoleEvent, ConsoleSurface, Pos, ReadlineError, ReadlineResult, Rect, Size,
            TextStyle};

/// Placeholder surface for an engine that was built before a terminal is available
/// (see [`crate::Readline::new_detached`]). Every operation fails fast with
/// [`ReadlineError::ConsoleNotAttached`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UninitializedConsole;

fn not_attached<T>(operation: &'static str) -> ReadlineResult<T> {
    Err(ReadlineError::ConsoleNotAttached { operation })
}

impl ConsoleSurface for UninitializedConsole {
    fn pos(&mut self) -> ReadlineResult<Pos> { not_attached("pos") }

    fn set_pos(&mut self, _pos: Pos) -> ReadlineResult<()> { not_attached("set_pos") }

    fn size(&mut self) -> ReadlineResult<Size> { not_attached("size") }

    fn write_scrolling(&mut self, _text: &str, _style: TextStyle) -> ReadlineResult<u16> {
        not_attached("write_scrolling")
    }

    fn clear_rect(&mut self, _rect: Rect) -> ReadlineResult<()> { not_attached("clear_rect") }

    fn scroll_window(&mut self, _lines: i32) -> ReadlineResult<()> {
        not_attached("scroll_window")
    }

    fn scroll_rect(&mut self, _rect: Rect, _dx: i32, _dy: i32) -> ReadlineResult<()> {
        not_attached("scroll_rect")
    }

    fn set_cursor(&mut self, _visible: bool, _size: u8) -> ReadlineResult<()> {
        not_attached("set_cursor")
    }

    fn peek(&mut self) -> ReadlineResult<bool> { not_attached("peek") }

    fn read_event(&mut self) -> ReadlineResult<ConsoleEvent> { not_attached("read_event") }

    fn bell(&mut self) -> ReadlineResult<()> { not_attached("bell") }

    fn try_clear_to_end_of_window(&mut self) -> ReadlineResult<bool> {
        not_attached("try_clear_to_end_of_window")
    }

    fn is_attached(&self) -> bool { false }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_operation_fails_fast() {
        let mut console = UninitializedConsole;
        assert!(!console.is_attached());
        assert!(matches!(
            console.read_event(),
            Err(ReadlineError::ConsoleNotAttached { operation: "read_event" })
        ));
        assert!(matches!(
            console.write_scrolling("x", TextStyle::default()),
            Err(ReadlineError::ConsoleNotAttached { operation: "write_scrolling" })
        ));
        assert!(console.bell().is_err());
    }
}
