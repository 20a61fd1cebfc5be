// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ConsoleEvent, ConsoleSurface, KeyPress, Pos, ReadlineError, ReadlineResult,
            Rect, Size, TextStyle, WriteOp, keypress, layout_write, ok, pos};
use std::{collections::VecDeque,
          io,
          sync::{Arc, Mutex, MutexGuard, PoisonError}};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// In-memory [`ConsoleSurface`]: a grid of cells, a cursor, and a queue of scripted
/// input events. Every call is recorded so tests can assert on what the engine did.
///
/// You can safely clone this struct, the clones share the same state. Keep one clone
/// and hand the other to [`crate::Readline`].
#[derive(Debug, Clone)]
pub struct ConsoleMock {
    inner: Arc<Mutex<ConsoleMockState>>,
}

#[derive(Debug)]
pub struct ConsoleMockState {
    pub window: Size,
    /// `grid[row][col]` holds one grapheme cluster. The cell to the right of a wide
    /// cluster holds an empty string.
    pub grid: Vec<Vec<String>>,
    pub cursor: Pos,
    pub cursor_visible: bool,
    pub cursor_size: u8,
    pub events: VecDeque<ConsoleEvent>,
    pub writes: Vec<(String, TextStyle)>,
    pub rows_scrolled_by_writes: u32,
    pub scroll_window_calls: Vec<i32>,
    pub scroll_rect_calls: Vec<(Rect, i32, i32)>,
    pub clear_rect_calls: Vec<Rect>,
    pub offers_fast_clear: bool,
    pub fast_clear_calls: usize,
    pub bells: usize,
}

impl ConsoleMockState {
    fn blank_row(&self) -> Vec<String> { vec![" ".to_string(); usize::from(self.window.cols)] }

    fn put(&mut self, grapheme: &str, width: u16) {
        let row = usize::from(self.cursor.row);
        let col = usize::from(self.cursor.col);
        if let Some(cells) = self.grid.get_mut(row) {
            if let Some(cell) = cells.get_mut(col) {
                *cell = grapheme.to_string();
            }
            for extra in 1..usize::from(width) {
                if let Some(cell) = cells.get_mut(col + extra) {
                    cell.clear();
                }
            }
        }
        self.cursor.col = self.cursor.col.saturating_add(width);
    }

    fn line_break(&mut self) {
        self.cursor.col = 0;
        if self.cursor.row + 1 >= self.window.rows {
            self.grid.remove(0);
            let blank = self.blank_row();
            self.grid.push(blank);
        } else {
            self.cursor.row += 1;
        }
    }

    fn blank(&mut self, rect: Rect) {
        let rect = rect.clipped_to(self.window);
        for row in rect.top..rect.bottom {
            for col in rect.left..rect.right {
                self.grid[usize::from(row)][usize::from(col)] = " ".to_string();
            }
        }
    }
}

impl ConsoleMock {
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        let window = Size { cols, rows };
        let grid = vec![vec![" ".to_string(); usize::from(cols)]; usize::from(rows)];
        Self {
            inner: Arc::new(Mutex::new(ConsoleMockState {
                window,
                grid,
                cursor: Pos::default(),
                cursor_visible: true,
                cursor_size: 25,
                events: VecDeque::new(),
                writes: vec![],
                rows_scrolled_by_writes: 0,
                scroll_window_calls: vec![],
                scroll_rect_calls: vec![],
                clear_rect_calls: vec![],
                offers_fast_clear: false,
                fast_clear_calls: 0,
                bells: 0,
            })),
        }
    }

    /// Offer [`ConsoleSurface::try_clear_to_end_of_window`].
    #[must_use]
    pub fn with_fast_clear(self) -> Self {
        self.state().offers_fast_clear = true;
        self
    }

    #[must_use]
    pub fn state(&self) -> MutexGuard<'_, ConsoleMockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push_event(&self, event: ConsoleEvent) { self.state().events.push_back(event); }

    pub fn push_key(&self, key: KeyPress) { self.push_event(ConsoleEvent::Key(key)); }

    /// One plain character key press per char.
    pub fn push_text(&self, text: &str) {
        for ch in text.chars() {
            self.push_key(keypress!(@char ch));
        }
    }

    pub fn push_abort(&self) { self.push_event(ConsoleEvent::Abort); }

    pub fn set_cursor_pos(&self, at: Pos) { self.state().cursor = at; }

    #[must_use]
    pub fn cursor(&self) -> Pos { self.state().cursor }

    /// Row contents with trailing blanks removed.
    #[must_use]
    pub fn row_text(&self, row: u16) -> String {
        let state = self.state();
        state
            .grid
            .get(usize::from(row))
            .map(|cells| cells.concat().trim_end().to_string())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn screen_text(&self) -> Vec<String> {
        let rows = self.state().window.rows;
        (0..rows).map(|row| self.row_text(row)).collect()
    }
}

impl ConsoleSurface for ConsoleMock {
    fn pos(&mut self) -> ReadlineResult<Pos> { ok!(self.state().cursor) }

    fn set_pos(&mut self, at: Pos) -> ReadlineResult<()> {
        let mut state = self.state();
        let window = state.window;
        state.cursor = pos(
            at.col.min(window.cols.saturating_sub(1)),
            at.row.min(window.rows.saturating_sub(1)),
        );
        ok!()
    }

    fn size(&mut self) -> ReadlineResult<Size> { ok!(self.state().window) }

    fn write_scrolling(&mut self, text: &str, style: TextStyle) -> ReadlineResult<u16> {
        let mut state = self.state();
        let layout = layout_write(state.cursor, text, state.window);
        for op in &layout.ops {
            match op {
                WriteOp::Text(chunk) => {
                    for grapheme in chunk.graphemes(true) {
                        let width = u16::try_from(grapheme.width()).unwrap_or(1);
                        state.put(grapheme, width);
                    }
                }
                WriteOp::LineBreak => state.line_break(),
            }
        }
        state.writes.push((text.to_string(), style));
        state.rows_scrolled_by_writes += u32::from(layout.rows_scrolled);
        ok!(layout.rows_scrolled)
    }

    fn clear_rect(&mut self, rect: Rect) -> ReadlineResult<()> {
        let mut state = self.state();
        state.clear_rect_calls.push(rect);
        state.blank(rect);
        ok!()
    }

    fn scroll_window(&mut self, lines: i32) -> ReadlineResult<()> {
        self.state().scroll_window_calls.push(lines);
        ok!()
    }

    fn scroll_rect(&mut self, rect: Rect, dx: i32, dy: i32) -> ReadlineResult<()> {
        let mut state = self.state();
        state.scroll_rect_calls.push((rect, dx, dy));
        let rect = rect.clipped_to(state.window);
        let snapshot = state.grid.clone();
        for row in rect.top..rect.bottom {
            for col in rect.left..rect.right {
                let src_row = i32::from(row) - dy;
                let src_col = i32::from(col) - dx;
                let inside = src_row >= i32::from(rect.top)
                    && src_row < i32::from(rect.bottom)
                    && src_col >= i32::from(rect.left)
                    && src_col < i32::from(rect.right);
                let cell = if inside {
                    let r = usize::try_from(src_row).unwrap_or_default();
                    let c = usize::try_from(src_col).unwrap_or_default();
                    snapshot[r][c].clone()
                } else {
                    " ".to_string()
                };
                state.grid[usize::from(row)][usize::from(col)] = cell;
            }
        }
        ok!()
    }

    fn set_cursor(&mut self, visible: bool, size: u8) -> ReadlineResult<()> {
        let mut state = self.state();
        state.cursor_visible = visible;
        if visible {
            state.cursor_size = size;
        }
        ok!()
    }

    fn peek(&mut self) -> ReadlineResult<bool> { ok!(!self.state().events.is_empty()) }

    fn read_event(&mut self) -> ReadlineResult<ConsoleEvent> {
        self.state().events.pop_front().ok_or_else(|| {
            ReadlineError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no more scripted console events",
            ))
        })
    }

    fn bell(&mut self) -> ReadlineResult<()> {
        self.state().bells += 1;
        ok!()
    }

    fn try_clear_to_end_of_window(&mut self) -> ReadlineResult<bool> {
        let mut state = self.state();
        if !state.offers_fast_clear {
            return ok!(false);
        }
        state.fast_clear_calls += 1;
        let (cursor, window) = (state.cursor, state.window);
        state.blank(Rect {
            left: cursor.col,
            top: cursor.row,
            right: window.cols,
            bottom: cursor.row + 1,
        });
        state.blank(Rect {
            left: 0,
            top: cursor.row + 1,
            right: window.cols,
            bottom: window.rows,
        });
        ok!(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_wraps_and_scrolls_grid() {
        let mut console = ConsoleMock::new(4, 2);
        console.set_pos(pos(0, 1)).unwrap();
        let scrolled = console.write_scrolling("abcdef", TextStyle::default()).unwrap();

        assert_eq!(scrolled, 1);
        assert_eq!(console.row_text(0), "abcd");
        assert_eq!(console.row_text(1), "ef");
        assert_eq!(console.cursor(), pos(2, 1));
    }

    #[test]
    fn test_scroll_rect_up_moves_rows() {
        let mut console = ConsoleMock::new(3, 3);
        console.write_scrolling("aaabbbcc", TextStyle::default()).unwrap();
        let full = Rect {
            left: 0,
            top: 0,
            right: 3,
            bottom: 3,
        };
        console.scroll_rect(full, 0, -1).unwrap();
        assert_eq!(console.screen_text(), vec!["bbb", "cc", ""]);
    }

    #[test]
    fn test_fast_clear_only_when_offered() {
        let mut plain = ConsoleMock::new(5, 2);
        assert!(!plain.try_clear_to_end_of_window().unwrap());

        let mut fast = ConsoleMock::new(5, 2).with_fast_clear();
        fast.write_scrolling("hello", TextStyle::default()).unwrap();
        fast.set_pos(pos(2, 0)).unwrap();
        assert!(fast.try_clear_to_end_of_window().unwrap());
        assert_eq!(fast.row_text(0), "he");
    }

    #[test]
    fn test_scripted_events() {
        let mut console = ConsoleMock::new(10, 2);
        console.push_text("hi");
        console.push_abort();
        assert!(console.peek().unwrap());
        assert_eq!(console.read_event().unwrap(), ConsoleEvent::Key(keypress!(@char 'h')));
        assert_eq!(console.read_event().unwrap(), ConsoleEvent::Key(keypress!(@char 'i')));
        assert_eq!(console.read_event().unwrap(), ConsoleEvent::Abort);
        assert!(console.read_event().is_err());
    }
}
