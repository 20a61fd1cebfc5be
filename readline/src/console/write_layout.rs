// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Where a write lands. Both the real console and the test console lay text out with
//! [`layout_write`], so scroll counts reported to the render engine agree between the
//! two.
//!
//! Rules:
//! - Text is placed one grapheme cluster at a time, using its display width.
//! - A cluster that does not fit in the rest of the row moves to the next row.
//! - Filling the last column wraps immediately.
//! - `\n` starts a new row. Other zero width control clusters are dropped.
//! - Starting a new row from the bottom row scrolls the window by one.

use crate::{Pos, Size, pos};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Text that fits on the current row.
    Text(String),
    /// Carriage return plus line feed.
    LineBreak,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteLayout {
    pub ops: Vec<WriteOp>,
    pub end: Pos,
    pub rows_scrolled: u16,
}

#[derive(Debug)]
struct LayoutCursor {
    col: u16,
    row: u16,
    window: Size,
    rows_scrolled: u16,
    ops: Vec<WriteOp>,
}

impl LayoutCursor {
    fn push_text(&mut self, text: &str) {
        match self.ops.last_mut() {
            Some(WriteOp::Text(acc)) => acc.push_str(text),
            _ => self.ops.push(WriteOp::Text(text.to_string())),
        }
    }

    fn line_break(&mut self) {
        self.ops.push(WriteOp::LineBreak);
        self.col = 0;
        if self.row + 1 >= self.window.rows {
            self.rows_scrolled += 1;
        } else {
            self.row += 1;
        }
    }
}

#[must_use]
pub fn layout_write(start: Pos, text: &str, window: Size) -> WriteLayout {
    let window = Size {
        cols: window.cols.max(1),
        rows: window.rows.max(1),
    };
    let mut cursor = LayoutCursor {
        col: start.col.min(window.cols - 1),
        row: start.row.min(window.rows - 1),
        window,
        rows_scrolled: 0,
        ops: vec![],
    };

    for grapheme in text.graphemes(true) {
        if grapheme == "\n" || grapheme == "\r\n" {
            cursor.line_break();
            continue;
        }

        let width = u16::try_from(grapheme.width()).unwrap_or(u16::MAX);
        if width == 0 {
            continue;
        }

        if cursor.col > 0 && cursor.col.saturating_add(width) > window.cols {
            cursor.line_break();
        }

        cursor.push_text(grapheme);
        cursor.col = cursor.col.saturating_add(width);

        if cursor.col >= window.cols {
            cursor.line_break();
        }
    }

    WriteLayout {
        end: pos(cursor.col, cursor.row),
        rows_scrolled: cursor.rows_scrolled,
        ops: cursor.ops,
    }
}

/// Display width of `text` as laid out by [`layout_write`], ignoring line breaks.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.graphemes(true)
        .filter(|it| *it != "\n" && *it != "\r\n")
        .map(UnicodeWidthStr::width)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fits_on_row() {
        let it = layout_write(pos(2, 0), "hello", size(20, 5));
        assert_eq!(it.ops, vec![WriteOp::Text("hello".into())]);
        assert_eq!(it.end, pos(7, 0));
        assert_eq!(it.rows_scrolled, 0);
    }

    #[test]
    fn test_wraps_when_row_is_full() {
        let it = layout_write(pos(0, 0), "abcdefgh", size(4, 5));
        assert_eq!(
            it.ops,
            vec![
                WriteOp::Text("abcd".into()),
                WriteOp::LineBreak,
                WriteOp::Text("efgh".into()),
                WriteOp::LineBreak,
            ]
        );
        assert_eq!(it.end, pos(0, 2));
    }

    #[test]
    fn test_scrolls_on_bottom_row() {
        let it = layout_write(pos(0, 2), "abcdef", size(4, 3));
        assert_eq!(it.end, pos(2, 2));
        assert_eq!(it.rows_scrolled, 1);
    }

    #[test]
    fn test_newline_and_wide_graphemes() {
        // The wide char does not fit in the last column, so it moves down.
        let it = layout_write(pos(0, 0), "abc😀\nx", size(4, 5));
        assert_eq!(
            it.ops,
            vec![
                WriteOp::Text("abc".into()),
                WriteOp::LineBreak,
                WriteOp::Text("😀".into()),
                WriteOp::LineBreak,
                WriteOp::Text("x".into()),
            ]
        );
        assert_eq!(it.end, pos(1, 2));
    }

    #[test]
    fn test_display_width() {
        assert_eq!(display_width("ab😀"), 4);
        assert_eq!(display_width("a\nb"), 2);
    }
}
