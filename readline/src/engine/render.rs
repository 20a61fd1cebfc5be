// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Keeps the terminal in sync with the active line buffer.
//!
//! The render engine remembers where the prompt starts and ends. Every write reports
//! how many rows the window scrolled, and both saved positions move up by that many
//! rows, so a redraw always starts at the prompt no matter how the line wrapped or the
//! window scrolled since the last one.

use crate::{BellStyle, ConsoleSurface, EditingMode, EngineOptions, LineBuffer, Pos,
            ReadlineError, ReadlineResult, Rect, Size, TextStyle, display_width, layout_write, ok,
            pos, size};
use smallvec::{SmallVec, smallvec};

/// Spans of one buffer paint: before the selection, the selection, after it.
pub type PaintSpans = SmallVec<[(String, TextStyle); 3]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderEngine {
    pub prompt_begin: Pos,
    pub prompt_end: Pos,
    /// Window size when the prompt was last printed.
    pub size: Size,
}

impl RenderEngine {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Print `prompt` at the cursor and record where it starts and ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the console can't be queried or written to.
    pub fn print_prompt(
        &mut self,
        console: &mut dyn ConsoleSurface,
        prompt: &str,
        style: TextStyle,
    ) -> ReadlineResult<()> {
        let at = console.pos()?;
        let scrolled = console.write_scrolling(prompt, style)?;
        self.prompt_begin = pos(at.col, at.row.saturating_sub(scrolled));
        self.prompt_end = console.pos()?;
        self.size = console.size()?;
        ok!()
    }

    /// One render pass:
    /// 1. Hide the cursor.
    /// 2. Reprint the prompt where it began.
    /// 3. Paint the quoted buffer, the selection in its own style.
    /// 4. Keep the bottom row free: scroll once more if the line ends on it or if
    ///    painting scrolled.
    /// 5. Move the saved prompt positions up by the rows scrolled.
    /// 6. Clear what is left of an older, longer line.
    /// 7. Show the cursor with the mode's size and place it at point.
    ///
    /// # Errors
    ///
    /// Returns an error if the console can't be queried or written to.
    pub fn update_line(
        &mut self,
        console: &mut dyn ConsoleSurface,
        options: &EngineOptions,
        mode: &dyn EditingMode,
    ) -> ReadlineResult<()> {
        let state = mode.state();
        console.set_cursor(false, mode.cursor_size())?;
        console.set_pos(self.prompt_begin)?;
        self.print_prompt(console, &state.display_prompt(), options.prompt_style())?;

        let mut scrolled: u16 = 0;
        for (text, style) in paint_spans(&state.buffer, options) {
            scrolled = scrolled.saturating_add(console.write_scrolling(&text, style)?);
        }

        let at = console.pos()?;
        let window = console.size()?;
        if at.row >= window.rows.saturating_sub(1) || scrolled > 0 {
            console.scroll_window(-1)?;
            let full = Rect {
                left: 0,
                top: 0,
                right: window.cols,
                bottom: window.rows,
            };
            console.scroll_rect(full, 0, -1)?;
            console.set_pos(pos(at.col, at.row.saturating_sub(1)))?;
            scrolled = scrolled.saturating_add(1);
        }

        self.shift_up(scrolled);
        self.clear_after(console, window)?;

        console.set_cursor(true, mode.cursor_size())?;
        let point_text = state.buffer.quoted_prefix(state.buffer.point());
        console.set_pos(self.wrap_from_prompt_end(&point_text, window))?;
        ok!()
    }

    fn shift_up(&mut self, rows: u16) {
        if rows == 0 {
            return;
        }
        self.prompt_begin.row = self.prompt_begin.row.saturating_sub(rows);
        self.prompt_end.row = self.prompt_end.row.saturating_sub(rows);
    }

    /// Blank the rest of the row and every row below it.
    fn clear_after(&self, console: &mut dyn ConsoleSurface, window: Size) -> ReadlineResult<()> {
        if console.try_clear_to_end_of_window()? {
            return ok!();
        }
        let at = console.pos()?;
        console.clear_rect(Rect {
            left: at.col,
            top: at.row,
            right: window.cols,
            bottom: at.row.saturating_add(1),
        })?;
        console.clear_rect(Rect {
            left: 0,
            top: at.row.saturating_add(1),
            right: window.cols,
            bottom: window.rows,
        })?;
        ok!()
    }

    /// Where `text` ends when written from the prompt end. Uses the same layout as
    /// the console, so a wide cluster pushed to the next row leaves the same gap. Rows
    /// past the bottom of the window are not clamped.
    #[must_use]
    pub fn wrap_from_prompt_end(&self, text: &str, window: Size) -> Pos {
        layout_write(self.prompt_end, text, size(window.cols, u16::MAX)).end
    }

    /// List completion candidates in columns below the line. The next render pass
    /// prints the prompt again under the list.
    ///
    /// # Errors
    ///
    /// Returns an error if the console can't be queried or written to.
    pub fn show_completions(
        &mut self,
        console: &mut dyn ConsoleSurface,
        options: &EngineOptions,
        buffer: &LineBuffer,
        candidates: &[String],
    ) -> ReadlineResult<()> {
        let window = console.size()?;
        let end_of_line = self.wrap_from_prompt_end(&buffer.quoted_text(), window);
        console.set_pos(end_of_line)?;

        let column_width = candidates.iter().map(|it| display_width(it)).max().unwrap_or(0) + 2;
        let columns = (usize::from(window.cols) / column_width).max(1);
        let mut text = String::from("\n");
        for row in candidates.chunks(columns) {
            let mut line = String::new();
            for candidate in row {
                line.push_str(candidate);
                line.push_str(&" ".repeat(column_width - display_width(candidate)));
            }
            text.push_str(line.trim_end());
            text.push('\n');
        }
        console.write_scrolling(&text, options.command_style())?;
        self.prompt_begin = console.pos()?;
        ok!()
    }

    /// Blank the window. The next render pass prints the prompt at the top.
    ///
    /// # Errors
    ///
    /// Returns an error if the console can't be queried or written to.
    pub fn clear_screen(&mut self, console: &mut dyn ConsoleSurface) -> ReadlineResult<()> {
        let window = console.size()?;
        console.clear_rect(Rect {
            left: 0,
            top: 0,
            right: window.cols,
            bottom: window.rows,
        })?;
        self.prompt_begin = pos(0, 0);
        console.set_pos(self.prompt_begin)?;
        ok!()
    }
}

/// The quoted buffer split into styled spans. Offsets come from the quoted text, so a
/// control character shown as `^A` is selected as a whole.
#[must_use]
pub fn paint_spans(buffer: &LineBuffer, options: &EngineOptions) -> PaintSpans {
    let command = options.command_style();
    let quoted = buffer.quoted_text();
    let spans: PaintSpans = match buffer.selection_range() {
        Some((start, end)) => {
            let start = buffer.quoted_prefix(start).len();
            let end = buffer.quoted_prefix(end).len();
            smallvec![
                (quoted[..start].to_string(), command),
                (quoted[start..end].to_string(), options.selection_style),
                (quoted[end..].to_string(), command),
            ]
        }
        None => smallvec![(quoted, command)],
    };
    spans.into_iter().filter(|(text, _)| !text.is_empty()).collect()
}

/// Ring the bell according to `style`.
///
/// # Errors
///
/// Returns [`ReadlineError::UnsupportedBellStyle`] for any style other than `none` and
/// `audible`.
pub fn ring_bell(console: &mut dyn ConsoleSurface, style: &BellStyle) -> ReadlineResult<()> {
    match style {
        BellStyle::None => ok!(),
        BellStyle::Audible => console.bell(),
        BellStyle::Visible | BellStyle::Other(_) => {
            Err(ReadlineError::UnsupportedBellStyle(style.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConsoleColor, ConsoleMock, EmacsMode, TestClipboard};
    use pretty_assertions::assert_eq;

    fn mode_with(prompt: &str, text: &str) -> EmacsMode {
        let mut mode = EmacsMode::new();
        mode.state_mut()
            .kill_ring
            .set_clipboard(Box::new(TestClipboard::default()));
        mode.readline_setup(prompt);
        mode.state_mut().buffer.set_text(text);
        mode
    }

    fn first_render(console: &mut ConsoleMock, mode: &EmacsMode) -> RenderEngine {
        let options = EngineOptions::default();
        let mut render = RenderEngine::new();
        render
            .print_prompt(console, &mode.state().prompt, options.prompt_style())
            .unwrap();
        render.update_line(console, &options, mode).unwrap();
        render
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let mut console = ConsoleMock::new(20, 5);
        let mode = mode_with("> ", "hello");
        let mut render = first_render(&mut console, &mode);
        let (begin, end, cursor) = (render.prompt_begin, render.prompt_end, console.cursor());

        render
            .update_line(&mut console, &EngineOptions::default(), &mode)
            .unwrap();
        assert_eq!(render.prompt_begin, begin);
        assert_eq!(render.prompt_end, end);
        assert_eq!(console.cursor(), cursor);
        assert_eq!(console.cursor(), pos(7, 0));
        assert!(console.state().scroll_window_calls.is_empty());
        assert_eq!(console.row_text(0), "> hello");
    }

    #[test]
    fn test_cursor_wraps_by_window_width() {
        let mut console = ConsoleMock::new(10, 6);
        let mode = mode_with("> ", "abcdefghijklmnopqrstuvw");
        let render = first_render(&mut console, &mode);

        // (2 + 23) = 25 columns past the prompt start: col 5, two rows down.
        assert_eq!(console.cursor(), pos(5, 2));
        assert_eq!(render.prompt_end, pos(2, 0));
        assert_eq!(console.screen_text()[..3], ["> abcdefgh", "ijklmnopqr", "stuvw"]);
    }

    #[test]
    fn test_last_row_is_kept_free() {
        let mut console = ConsoleMock::new(10, 3);
        console.set_cursor_pos(pos(0, 2));
        let mode = mode_with("> ", "hi");
        let mut render = first_render(&mut console, &mode);

        assert_eq!(console.state().scroll_window_calls, vec![-1]);
        assert_eq!(render.prompt_begin, pos(0, 1));
        assert_eq!(render.prompt_end, pos(2, 1));
        assert_eq!(console.row_text(1), "> hi");
        assert_eq!(console.cursor(), pos(4, 1));

        render
            .update_line(&mut console, &EngineOptions::default(), &mode)
            .unwrap();
        assert_eq!(console.state().scroll_window_calls, vec![-1]);
        assert_eq!(render.prompt_begin, pos(0, 1));
    }

    #[test]
    fn test_wide_cluster_pushed_to_next_row_moves_cursor_with_it() {
        let mut console = ConsoleMock::new(10, 5);
        let mut mode = mode_with("> ", "a一一一一一");
        let render = first_render(&mut console, &mode);
        assert_eq!(console.row_text(0), "> a一一一");
        assert_eq!(console.row_text(1), "一一");
        // Column 9 of the first row is left empty.
        assert_eq!(console.cursor(), pos(4, 1));
        assert_eq!(render.wrap_from_prompt_end("a一一一一", size(10, 5)), pos(2, 1));

        mode.state_mut().buffer.set_point(4);
        let mut render = render;
        render
            .update_line(&mut console, &EngineOptions::default(), &mode)
            .unwrap();
        assert_eq!(console.cursor(), pos(9, 0));
    }

    #[test]
    fn test_wrapping_on_the_last_row_moves_prompt_up() {
        let mut console = ConsoleMock::new(5, 4);
        console.set_cursor_pos(pos(0, 3));
        let mode = mode_with("$ ", "abcdef");
        let render = first_render(&mut console, &mode);

        // One row scrolled by the wrap, one more to keep the bottom row free.
        assert_eq!(render.prompt_begin, pos(0, 1));
        assert_eq!(console.row_text(1), "$ abc");
        assert_eq!(console.row_text(2), "def");
        assert_eq!(console.cursor(), pos(3, 2));
    }

    #[test]
    fn test_shorter_line_clears_leftovers() {
        let mut console = ConsoleMock::new(12, 4);
        let mut mode = mode_with("> ", "hello world");
        let mut render = first_render(&mut console, &mode);
        mode.state_mut().buffer.set_text("he");
        render
            .update_line(&mut console, &EngineOptions::default(), &mode)
            .unwrap();
        assert_eq!(console.screen_text(), vec!["> he", "", "", ""]);
        assert_eq!(console.state().clear_rect_calls.len(), 4);

        let mut fast = ConsoleMock::new(12, 4).with_fast_clear();
        first_render(&mut fast, &mode);
        assert!(fast.state().clear_rect_calls.is_empty());
        assert_eq!(fast.state().fast_clear_calls, 1);
    }

    #[test]
    fn test_selection_spans() {
        let mut buffer = LineBuffer::with_text("a\u{1}bcd");
        buffer.enable_selection = true;
        buffer.set_point(1);
        buffer.set_mark(Some(3));
        let options = EngineOptions {
            command_color: Some(ConsoleColor::new(10)),
            ..EngineOptions::default()
        };
        let command = TextStyle::fg(Some(ConsoleColor::new(10)));

        let spans = paint_spans(&buffer, &options);
        assert_eq!(
            spans.to_vec(),
            vec![
                ("a".to_string(), command),
                ("^Ab".to_string(), TextStyle::default_selection()),
                ("cd".to_string(), command),
            ]
        );

        buffer.enable_selection = false;
        assert_eq!(
            paint_spans(&buffer, &options).to_vec(),
            vec![("a^Abcd".to_string(), command)]
        );
    }

    #[test]
    fn test_completions_listed_below_line() {
        let mut console = ConsoleMock::new(20, 6);
        let mode = mode_with("> ", "im");
        let mut render = first_render(&mut console, &mode);
        let candidates = vec!["import".to_string(), "impl".to_string(), "imports".to_string()];
        render
            .show_completions(
                &mut console,
                &EngineOptions::default(),
                &mode.state().buffer,
                &candidates,
            )
            .unwrap();
        assert_eq!(console.row_text(1), "import   impl");
        assert_eq!(console.row_text(2), "imports");
        assert_eq!(render.prompt_begin, pos(0, 3));
    }

    #[test]
    fn test_bell_styles() {
        let mut console = ConsoleMock::new(10, 2);
        ring_bell(&mut console, &BellStyle::None).unwrap();
        ring_bell(&mut console, &BellStyle::Audible).unwrap();
        assert_eq!(console.state().bells, 1);
        assert!(matches!(
            ring_bell(&mut console, &BellStyle::Visible),
            Err(ReadlineError::UnsupportedBellStyle(ref it)) if it == "visible"
        ));
        assert!(matches!(
            ring_bell(&mut console, &BellStyle::Other("chime".into())),
            Err(ReadlineError::UnsupportedBellStyle(_))
        ));
    }
}
