// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The text being edited. All offsets (`point`, `mark`) count grapheme clusters, not
//! bytes or chars, so that a cursor can never land inside a cluster.

use crate::display_width;
use std::fmt::Write as _;
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    /// Insertion point, `0..=len()`.
    point: usize,
    /// Other end of the selection, `0..=len()`.
    mark: Option<usize>,
    pub enable_selection: bool,
}

/// Display form of `text`: C0 controls and DEL in caret notation (`^A`, `^?`), C1
/// controls as `\xNN`, everything else unchanged.
#[must_use]
pub fn quote_text(text: &str) -> String {
    let mut acc = String::with_capacity(text.len());
    for ch in text.chars() {
        match u32::from(ch) {
            code @ 0x00..=0x1F => {
                acc.push('^');
                acc.push(char::from_u32(code + 0x40).unwrap_or('?'));
            }
            0x7F => acc.push_str("^?"),
            code @ 0x80..=0x9F => {
                write!(acc, "\\x{code:02x}").ok();
            }
            _ => acc.push(ch),
        }
    }
    acc
}

impl LineBuffer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut it = Self::default();
        it.set_text(text);
        it
    }

    #[must_use]
    pub fn text(&self) -> &str { &self.text }

    #[must_use]
    pub fn point(&self) -> usize { self.point }

    #[must_use]
    pub fn mark(&self) -> Option<usize> { self.mark }

    /// Number of grapheme clusters.
    #[must_use]
    pub fn len(&self) -> usize { self.text.graphemes(true).count() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.text.is_empty() }

    /// Replace the whole text. Point moves to the end and the mark is dropped.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.point = self.len();
        self.mark = None;
    }

    /// Clamped to the text.
    pub fn set_point(&mut self, point: usize) { self.point = point.min(self.len()); }

    /// Clamped to the text.
    pub fn set_mark(&mut self, mark: Option<usize>) {
        let len = self.len();
        self.mark = mark.map(|it| it.min(len));
    }

    fn byte_offset(&self, index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    fn graphemes(&self) -> Vec<&str> { self.text.graphemes(true).collect() }

    /// Text between two grapheme offsets, in either order.
    #[must_use]
    pub fn slice(&self, a: usize, b: usize) -> &str {
        let (start, end) = (a.min(b), a.max(b));
        &self.text[self.byte_offset(start)..self.byte_offset(end)]
    }

    /// Number of clusters that start before `byte`. A byte inside a cluster counts
    /// that whole cluster.
    fn index_at_byte(&self, byte: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .take_while(|(offset, _)| *offset < byte)
            .count()
    }

    /// Insert at point and move point past the inserted text. The insertion can join
    /// clusters (a zero width joiner between two emoji), so the new offsets are
    /// worked out from bytes.
    pub fn insert_str(&mut self, text: &str) {
        let at = self.byte_offset(self.point);
        let mark_byte = self
            .mark
            .filter(|mark| *mark > self.point)
            .map(|mark| self.byte_offset(mark) + text.len());
        self.text.insert_str(at, text);
        self.point = self.index_at_byte(at + text.len());
        if let Some(byte) = mark_byte {
            self.mark = Some(self.index_at_byte(byte));
        }
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0_u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Remove the clusters between `a` and `b` (either order) and return them. Point
    /// and mark move with the text.
    pub fn delete_range(&mut self, a: usize, b: usize) -> String {
        let (start, end) = (a.min(b).min(self.len()), a.max(b).min(self.len()));
        if start == end {
            return String::new();
        }
        let byte_start = self.byte_offset(start);
        let byte_end = self.byte_offset(end);
        let removed: String = self.text.drain(byte_start..byte_end).collect();
        let shift = |it: usize| {
            if it >= end {
                it - (end - start)
            } else {
                it.min(start)
            }
        };
        self.point = shift(self.point);
        self.mark = self.mark.map(shift);
        removed
    }

    /// Delete the cluster under point. Returns `false` at the end of the text.
    pub fn delete_char(&mut self) -> bool {
        if self.point >= self.len() {
            return false;
        }
        self.delete_range(self.point, self.point + 1);
        true
    }

    /// Delete the cluster before point. Returns `false` at the start of the text.
    pub fn backward_delete_char(&mut self) -> bool {
        if self.point == 0 {
            return false;
        }
        self.delete_range(self.point - 1, self.point);
        true
    }

    pub fn forward_char(&mut self) { self.set_point(self.point + 1); }

    pub fn backward_char(&mut self) { self.point = self.point.saturating_sub(1); }

    pub fn beginning_of_line(&mut self) { self.point = 0; }

    pub fn end_of_line(&mut self) { self.point = self.len(); }

    /// Offset of the end of the next word after point.
    #[must_use]
    pub fn next_word_end(&self) -> usize {
        let graphemes = self.graphemes();
        let mut index = self.point;
        while index < graphemes.len() && !is_word(graphemes[index]) {
            index += 1;
        }
        while index < graphemes.len() && is_word(graphemes[index]) {
            index += 1;
        }
        index
    }

    /// Offset of the start of the word before point.
    #[must_use]
    pub fn previous_word_start(&self) -> usize {
        let graphemes = self.graphemes();
        let mut index = self.point.min(graphemes.len());
        while index > 0 && !is_word(graphemes[index - 1]) {
            index -= 1;
        }
        while index > 0 && is_word(graphemes[index - 1]) {
            index -= 1;
        }
        index
    }

    /// Offset of the start of the next word after point (vi `w`).
    #[must_use]
    pub fn next_word_start(&self) -> usize {
        let graphemes = self.graphemes();
        let mut index = self.point;
        while index < graphemes.len() && is_word(graphemes[index]) {
            index += 1;
        }
        while index < graphemes.len() && !is_word(graphemes[index]) {
            index += 1;
        }
        index
    }

    pub fn forward_word(&mut self) { self.point = self.next_word_end(); }

    pub fn backward_word(&mut self) { self.point = self.previous_word_start(); }

    /// Swap the two clusters around point and move point forward. At the end of the
    /// text the last two clusters are swapped.
    pub fn transpose_chars(&mut self) -> bool {
        let len = self.len();
        if len < 2 || self.point == 0 {
            return false;
        }
        let at = if self.point >= len { len - 1 } else { self.point };
        let graphemes = self.graphemes();
        let swapped = format!("{}{}", graphemes[at], graphemes[at - 1]);
        self.delete_range(at - 1, at + 1);
        self.point = at - 1;
        self.insert_str(&swapped);
        true
    }

    /// Selection bounds, smaller offset first. `None` unless selection is enabled, a
    /// mark is set, and the selection is not empty.
    #[must_use]
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        if !self.enable_selection {
            return None;
        }
        let mark = self.mark?;
        (mark != self.point).then(|| (mark.min(self.point), mark.max(self.point)))
    }

    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        self.selection_range().map(|(start, end)| self.slice(start, end))
    }

    /// Delete the selection, if any, and return it.
    pub fn delete_selection(&mut self) -> Option<String> {
        let (start, end) = self.selection_range()?;
        let removed = self.delete_range(start, end);
        self.mark = None;
        Some(removed)
    }

    /// The display form of the whole buffer, see [`quote_text`].
    #[must_use]
    pub fn quoted_text(&self) -> String { quote_text(&self.text) }

    /// The display form of the first `index` clusters.
    #[must_use]
    pub fn quoted_prefix(&self, index: usize) -> String {
        quote_text(&self.text[..self.byte_offset(index)])
    }

    /// Display width of the quoted text before point.
    #[must_use]
    pub fn visible_width_to_point(&self) -> usize { display_width(&self.quoted_prefix(self.point)) }
}

fn is_word(grapheme: &str) -> bool { grapheme.chars().any(char::is_alphanumeric) }

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("abc", "abc")]
    #[test_case("a\x01b", "a^Ab")]
    #[test_case("\x7f", "^?")]
    #[test_case("\t", "^I")]
    #[test_case("x\u{85}", "x\\x85")]
    #[test_case("héllo", "héllo")]
    fn test_quote_text(input: &str, expected: &str) {
        assert_eq!(quote_text(input), expected);
    }

    #[test]
    fn test_insert_and_delete() {
        let mut buffer = LineBuffer::new();
        buffer.insert_str("hllo");
        buffer.set_point(1);
        buffer.insert_char('e');
        assert_eq!(buffer.text(), "hello");
        assert_eq!(buffer.point(), 2);

        assert!(buffer.backward_delete_char());
        assert_eq!(buffer.text(), "hllo");
        assert_eq!(buffer.point(), 1);

        assert!(buffer.delete_char());
        assert_eq!(buffer.text(), "hlo");
        buffer.end_of_line();
        assert!(!buffer.delete_char());
    }

    #[test]
    fn test_insert_that_joins_clusters() {
        let mut buffer = LineBuffer::with_text("👨👩x");
        buffer.set_point(1);
        buffer.set_mark(Some(3));
        buffer.insert_char('\u{200D}');
        assert_eq!(buffer.text(), "👨\u{200D}👩x");
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.point(), 1);
        assert_eq!(buffer.mark(), Some(2));

        buffer.insert_char('y');
        assert_eq!(buffer.text(), "👨\u{200D}👩yx");
        assert_eq!(buffer.point(), 2);
        assert_eq!(buffer.mark(), Some(3));
    }

    #[test]
    fn test_graphemes_are_atomic() {
        let mut buffer = LineBuffer::with_text("a😀b");
        assert_eq!(buffer.len(), 3);
        buffer.backward_char();
        assert!(buffer.backward_delete_char());
        assert_eq!(buffer.text(), "ab");
        assert_eq!(buffer.point(), 1);
    }

    #[test]
    fn test_word_motion() {
        let mut buffer = LineBuffer::with_text("foo  bar-baz");
        buffer.beginning_of_line();
        buffer.forward_word();
        assert_eq!(buffer.point(), 3);
        buffer.forward_word();
        assert_eq!(buffer.point(), 8);
        assert_eq!(buffer.next_word_start(), 9);
        buffer.end_of_line();
        buffer.backward_word();
        assert_eq!(buffer.point(), 9);
        buffer.backward_word();
        assert_eq!(buffer.point(), 5);
    }

    #[test]
    fn test_delete_range_moves_point_and_mark() {
        let mut buffer = LineBuffer::with_text("0123456789");
        buffer.set_mark(Some(8));
        buffer.set_point(6);
        let removed = buffer.delete_range(2, 4);
        assert_eq!(removed, "23");
        assert_eq!(buffer.text(), "01456789");
        assert_eq!(buffer.point(), 4);
        assert_eq!(buffer.mark(), Some(6));
    }

    #[test]
    fn test_transpose_chars() {
        let mut buffer = LineBuffer::with_text("abc");
        assert!(buffer.transpose_chars());
        assert_eq!(buffer.text(), "acb");
        buffer.set_point(1);
        assert!(buffer.transpose_chars());
        assert_eq!(buffer.text(), "cab");
        assert_eq!(buffer.point(), 2);
    }

    #[test]
    fn test_selection_needs_enable_and_mark() {
        let mut buffer = LineBuffer::with_text("hello world");
        buffer.set_mark(Some(0));
        buffer.set_point(5);
        assert_eq!(buffer.selection_range(), None);

        buffer.enable_selection = true;
        assert_eq!(buffer.selection_range(), Some((0, 5)));
        assert_eq!(buffer.selected_text(), Some("hello"));

        buffer.set_mark(Some(5));
        assert_eq!(buffer.selection_range(), None);
    }

    #[test]
    fn test_visible_width_uses_quoted_form() {
        let mut buffer = LineBuffer::with_text("a\x01😀");
        assert_eq!(buffer.visible_width_to_point(), 5);
        buffer.set_point(2);
        assert_eq!(buffer.visible_width_to_point(), 3);
        assert_eq!(buffer.quoted_prefix(2), "a^A");
    }
}
