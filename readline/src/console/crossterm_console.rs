// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ConsoleEvent, ConsoleSurface, KeyPress, Pos, ReadlineResult, Rect, Size,
            TextStyle, WriteLayout, WriteOp, layout_write, ok, pos, size};
use crossterm::{QueueableCommand, cursor,
                event::{self, Event, KeyEventKind},
                style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
                terminal::{self, Clear, ClearType, ScrollDown, ScrollUp}};
use std::{io::{self, Stdout, Write},
          time::Duration};

/// [`ConsoleSurface`] backed by crossterm on stdout. Raw mode is on for as long as
/// this value lives.
#[derive(Debug)]
pub struct CrosstermConsole {
    output: Stdout,
}

impl CrosstermConsole {
    /// # Errors
    ///
    /// Returns an error if raw mode can't be enabled (eg: stdin is not a terminal).
    pub fn try_new() -> ReadlineResult<Self> {
        terminal::enable_raw_mode()?;
        ok!(Self {
            output: io::stdout(),
        })
    }
}

impl Drop for CrosstermConsole {
    fn drop(&mut self) {
        // Best effort, there is nowhere to report failures from here.
        self.output.queue(cursor::Show).ok();
        self.output.queue(cursor::SetCursorStyle::DefaultUserShape).ok();
        self.output.flush().ok();
        terminal::disable_raw_mode().ok();
    }
}

/// Queue the commands that paint `layout` with `style`. Colors are reset around line
/// breaks so that a scroll does not fill the new row with the background color.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn queue_layout(
    output: &mut impl Write,
    layout: &WriteLayout,
    style: TextStyle,
) -> io::Result<()> {
    let is_styled = style.fg.is_some() || style.bg.is_some();
    let apply_style = |output: &mut dyn Write| -> io::Result<()> {
        if let Some(fg) = style.fg {
            output.queue(SetForegroundColor(fg.into()))?;
        }
        if let Some(bg) = style.bg {
            output.queue(SetBackgroundColor(bg.into()))?;
        }
        ok!()
    };

    apply_style(output)?;
    for op in &layout.ops {
        match op {
            WriteOp::Text(text) => {
                output.queue(Print(text))?;
            }
            WriteOp::LineBreak if is_styled => {
                output.queue(ResetColor)?;
                output.queue(Print("\r\n"))?;
                apply_style(output)?;
            }
            WriteOp::LineBreak => {
                output.queue(Print("\r\n"))?;
            }
        }
    }
    if is_styled {
        output.queue(ResetColor)?;
    }
    ok!()
}

impl ConsoleSurface for CrosstermConsole {
    fn pos(&mut self) -> ReadlineResult<Pos> {
        let (col, row) = cursor::position()?;
        ok!(pos(col, row))
    }

    fn set_pos(&mut self, pos: Pos) -> ReadlineResult<()> {
        self.output.queue(cursor::MoveTo(pos.col, pos.row))?;
        self.output.flush()?;
        ok!()
    }

    fn size(&mut self) -> ReadlineResult<Size> {
        let (cols, rows) = terminal::size()?;
        ok!(size(cols, rows))
    }

    fn write_scrolling(&mut self, text: &str, style: TextStyle) -> ReadlineResult<u16> {
        let start = self.pos()?;
        let window = self.size()?;
        let layout = layout_write(start, text, window);
        queue_layout(&mut self.output, &layout, style)?;
        self.output.flush()?;
        ok!(layout.rows_scrolled)
    }

    fn clear_rect(&mut self, rect: Rect) -> ReadlineResult<()> {
        let window = self.size()?;
        let rect = rect.clipped_to(window);
        if rect.is_empty() {
            return ok!();
        }
        let saved = self.pos()?;
        for row in rect.top..rect.bottom {
            self.output.queue(cursor::MoveTo(rect.left, row))?;
            if rect.right >= window.cols {
                self.output.queue(Clear(ClearType::UntilNewLine))?;
            } else {
                let blanks = " ".repeat(usize::from(rect.right - rect.left));
                self.output.queue(Print(blanks))?;
            }
        }
        self.output.queue(cursor::MoveTo(saved.col, saved.row))?;
        self.output.flush()?;
        ok!()
    }

    /// The terminal viewport follows the output, so there is nothing to do.
    fn scroll_window(&mut self, lines: i32) -> ReadlineResult<()> {
        tracing::trace!(message = "crossterm console -> scroll_window", lines);
        ok!()
    }

    /// Only full width rectangles can be scrolled, using a scroll region. `dx` is
    /// ignored.
    fn scroll_rect(&mut self, rect: Rect, _dx: i32, dy: i32) -> ReadlineResult<()> {
        let window = self.size()?;
        let rect = rect.clipped_to(window);
        if rect.is_empty() || dy == 0 {
            return ok!();
        }
        if rect.left != 0 || rect.right < window.cols {
            tracing::debug!(message = "crossterm console -> partial width scroll skipped", ?rect);
            return ok!();
        }

        let saved = self.pos()?;
        let lines = u16::try_from(dy.unsigned_abs()).unwrap_or(u16::MAX);
        // DECSTBM, 1-based and inclusive.
        self.output
            .queue(Print(format!("\x1b[{};{}r", rect.top + 1, rect.bottom)))?;
        if dy < 0 {
            self.output.queue(ScrollUp(lines))?;
        } else {
            self.output.queue(ScrollDown(lines))?;
        }
        self.output.queue(Print("\x1b[r"))?;
        self.output.queue(cursor::MoveTo(saved.col, saved.row))?;
        self.output.flush()?;
        ok!()
    }

    fn set_cursor(&mut self, visible: bool, size: u8) -> ReadlineResult<()> {
        if visible {
            let shape = match size {
                100.. => cursor::SetCursorStyle::SteadyBlock,
                50.. => cursor::SetCursorStyle::SteadyUnderScore,
                _ => cursor::SetCursorStyle::DefaultUserShape,
            };
            self.output.queue(shape)?;
            self.output.queue(cursor::Show)?;
        } else {
            self.output.queue(cursor::Hide)?;
        }
        self.output.flush()?;
        ok!()
    }

    fn peek(&mut self) -> ReadlineResult<bool> { ok!(event::poll(Duration::ZERO)?) }

    /// Ctrl+C arrives as a key event in raw mode and is reported as
    /// [`ConsoleEvent::Abort`]. Other events (resize, mouse, focus) are skipped since
    /// the size is queried on every render.
    fn read_event(&mut self) -> ReadlineResult<ConsoleEvent> {
        loop {
            let Event::Key(key_event) = event::read()? else {
                continue;
            };
            if key_event.kind == KeyEventKind::Release {
                continue;
            }
            let Ok(key_press) = KeyPress::try_from(key_event) else {
                continue;
            };
            if key_press == KeyPress::ctrl_c() {
                return ok!(ConsoleEvent::Abort);
            }
            return ok!(ConsoleEvent::Key(key_press));
        }
    }

    fn bell(&mut self) -> ReadlineResult<()> {
        self.output.queue(Print('\x07'))?;
        self.output.flush()?;
        ok!()
    }

    fn try_clear_to_end_of_window(&mut self) -> ReadlineResult<bool> {
        self.output.queue(Clear(ClearType::FromCursorDown))?;
        self.output.flush()?;
        ok!(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConsoleColor, StdoutMock};

    #[test]
    fn test_queue_layout_plain() {
        let mut stdout_mock = StdoutMock::new();
        let layout = layout_write(pos(0, 0), "abcdef", size(4, 10));
        queue_layout(&mut stdout_mock, &layout, TextStyle::default()).unwrap();
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string(), "abcd\r\nef");
    }

    #[test]
    fn test_queue_layout_styled_resets_around_line_breaks() {
        let mut stdout_mock = StdoutMock::new();
        let layout = layout_write(pos(0, 0), "abcdef", size(4, 10));
        let style = TextStyle::fg(Some(ConsoleColor::new(12)));
        queue_layout(&mut stdout_mock, &layout, style).unwrap();

        let it = stdout_mock.get_copy_of_buffer_as_string();
        assert!(it.contains("abcd"));
        assert!(it.contains("ef"));
        let reset = "\x1b[0m";
        assert_eq!(it.matches(reset).count(), 2);
        assert!(it.ends_with(reset));
    }
}
