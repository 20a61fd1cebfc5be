// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Builtin editing commands. Each one is a plain `fn(&mut ModeState, KeyPress)` so
//! that it can sit in a dispatch table, and is looked up by its bindable name (the
//! inputrc name with `-` replaced by `_`).

use crate::{BuiltinCommandFn, CommandOutcome, KeyPress, LineBuffer, ModeState,
            SearchDirection, complete, possible_completions, start_search};
use unicode_segmentation::UnicodeSegmentation;

type Outcome = CommandOutcome;

pub fn self_insert(state: &mut ModeState, key: KeyPress) -> Outcome {
    let Some(ch) = key.printable_char() else {
        return Outcome::Continue;
    };
    state.buffer.delete_selection();
    state.buffer.set_mark(None);
    state.buffer.insert_char(ch);
    Outcome::Continue
}

pub fn accept_line(state: &mut ModeState, _key: KeyPress) -> Outcome {
    state.buffer.set_mark(None);
    Outcome::Accept
}

pub fn abort(state: &mut ModeState, _key: KeyPress) -> Outcome {
    state.buffer.set_mark(None);
    Outcome::Bell
}

pub fn clear_screen(_state: &mut ModeState, _key: KeyPress) -> Outcome { Outcome::ClearScreen }

// Motion.

pub fn beginning_of_line(state: &mut ModeState, _key: KeyPress) -> Outcome {
    state.buffer.set_mark(None);
    state.buffer.beginning_of_line();
    Outcome::Continue
}

pub fn end_of_line(state: &mut ModeState, _key: KeyPress) -> Outcome {
    state.buffer.set_mark(None);
    state.buffer.end_of_line();
    Outcome::Continue
}

pub fn forward_char(state: &mut ModeState, _key: KeyPress) -> Outcome {
    state.buffer.set_mark(None);
    state.buffer.forward_char();
    Outcome::Continue
}

pub fn backward_char(state: &mut ModeState, _key: KeyPress) -> Outcome {
    state.buffer.set_mark(None);
    state.buffer.backward_char();
    Outcome::Continue
}

pub fn forward_word(state: &mut ModeState, _key: KeyPress) -> Outcome {
    state.buffer.set_mark(None);
    state.buffer.forward_word();
    Outcome::Continue
}

pub fn backward_word(state: &mut ModeState, _key: KeyPress) -> Outcome {
    state.buffer.set_mark(None);
    state.buffer.backward_word();
    Outcome::Continue
}

// Selection: shift + motion sets the mark on the first move.

fn extend_selection(state: &mut ModeState, motion: fn(&mut LineBuffer)) -> Outcome {
    if state.buffer.mark().is_none() {
        let point = state.buffer.point();
        state.buffer.set_mark(Some(point));
    }
    motion(&mut state.buffer);
    Outcome::Continue
}

pub fn forward_char_extend_selection(state: &mut ModeState, _key: KeyPress) -> Outcome {
    extend_selection(state, LineBuffer::forward_char)
}

pub fn backward_char_extend_selection(state: &mut ModeState, _key: KeyPress) -> Outcome {
    extend_selection(state, LineBuffer::backward_char)
}

pub fn forward_word_extend_selection(state: &mut ModeState, _key: KeyPress) -> Outcome {
    extend_selection(state, LineBuffer::forward_word)
}

pub fn backward_word_extend_selection(state: &mut ModeState, _key: KeyPress) -> Outcome {
    extend_selection(state, LineBuffer::backward_word)
}

pub fn beginning_of_line_extend_selection(state: &mut ModeState, _key: KeyPress) -> Outcome {
    extend_selection(state, LineBuffer::beginning_of_line)
}

pub fn end_of_line_extend_selection(state: &mut ModeState, _key: KeyPress) -> Outcome {
    extend_selection(state, LineBuffer::end_of_line)
}

// Deletes and kills.

pub fn delete_char(state: &mut ModeState, _key: KeyPress) -> Outcome {
    if state.buffer.delete_selection().is_some() || state.buffer.delete_char() {
        Outcome::Continue
    } else {
        Outcome::Bell
    }
}

pub fn backward_delete_char(state: &mut ModeState, _key: KeyPress) -> Outcome {
    if state.buffer.delete_selection().is_some() || state.buffer.backward_delete_char() {
        Outcome::Continue
    } else {
        Outcome::Bell
    }
}

pub fn kill_line(state: &mut ModeState, _key: KeyPress) -> Outcome {
    let point = state.buffer.point();
    let killed = state.buffer.delete_range(point, state.buffer.len());
    state.kill_text(&killed, false);
    Outcome::Continue
}

pub fn backward_kill_line(state: &mut ModeState, _key: KeyPress) -> Outcome {
    let point = state.buffer.point();
    let killed = state.buffer.delete_range(0, point);
    state.kill_text(&killed, true);
    Outcome::Continue
}

pub fn kill_whole_line(state: &mut ModeState, _key: KeyPress) -> Outcome {
    let killed = state.buffer.delete_range(0, state.buffer.len());
    state.kill_text(&killed, false);
    Outcome::Continue
}

pub fn kill_word(state: &mut ModeState, _key: KeyPress) -> Outcome {
    let (point, end) = (state.buffer.point(), state.buffer.next_word_end());
    let killed = state.buffer.delete_range(point, end);
    state.kill_text(&killed, false);
    Outcome::Continue
}

pub fn backward_kill_word(state: &mut ModeState, _key: KeyPress) -> Outcome {
    let (start, point) = (state.buffer.previous_word_start(), state.buffer.point());
    let killed = state.buffer.delete_range(start, point);
    state.kill_text(&killed, true);
    Outcome::Continue
}

/// Kill back to the previous whitespace.
pub fn unix_word_rubout(state: &mut ModeState, _key: KeyPress) -> Outcome {
    let point = state.buffer.point();
    let graphemes: Vec<&str> = state.buffer.slice(0, point).graphemes(true).collect();
    let is_space = |it: &str| it.chars().all(char::is_whitespace);
    let mut start = graphemes.len();
    while start > 0 && is_space(graphemes[start - 1]) {
        start -= 1;
    }
    while start > 0 && !is_space(graphemes[start - 1]) {
        start -= 1;
    }
    let killed = state.buffer.delete_range(start, point);
    state.kill_text(&killed, true);
    Outcome::Continue
}

/// Kill the selection, or the previous word when there is none.
pub fn kill_region(state: &mut ModeState, key: KeyPress) -> Outcome {
    match state.buffer.delete_selection() {
        Some(killed) => {
            state.kill_text(&killed, false);
            Outcome::Continue
        }
        None => unix_word_rubout(state, key),
    }
}

pub fn yank(state: &mut ModeState, _key: KeyPress) -> Outcome {
    match state.kill_ring.yank() {
        Some(text) => {
            state.buffer.delete_selection();
            let start = state.buffer.point();
            state.buffer.insert_str(&text);
            state.last_yank = Some((start, state.buffer.point()));
            Outcome::Continue
        }
        None => Outcome::Bell,
    }
}

/// Replace the text just yanked with the next older kill ring entry.
pub fn yank_pop(state: &mut ModeState, _key: KeyPress) -> Outcome {
    let Some((start, end)) = state.last_yank else {
        return Outcome::Bell;
    };
    let Some(text) = state.kill_ring.rotate() else {
        return Outcome::Bell;
    };
    state.buffer.delete_range(start, end);
    state.buffer.set_point(start);
    state.buffer.insert_str(&text);
    state.last_yank = Some((start, state.buffer.point()));
    Outcome::Continue
}

pub fn transpose_chars(state: &mut ModeState, _key: KeyPress) -> Outcome {
    if state.buffer.transpose_chars() {
        Outcome::Continue
    } else {
        Outcome::Bell
    }
}

// Clipboard.

pub fn copy_region_to_clipboard(state: &mut ModeState, _key: KeyPress) -> Outcome {
    match state.buffer.selected_text().map(ToString::to_string) {
        Some(text) => {
            state.kill_ring.copy_to_clipboard(text);
            Outcome::Continue
        }
        None => Outcome::Bell,
    }
}

/// Insert the clipboard. Multi line content puts the first line in the buffer and
/// accepts it, and queues the remaining lines to be delivered one per step.
pub fn paste(state: &mut ModeState, _key: KeyPress) -> Outcome {
    let Some(content) = state.kill_ring.clipboard_content() else {
        return Outcome::Bell;
    };
    let content = content.replace("\r\n", "\n");
    let mut lines = content.split('\n');
    let first = lines.next().unwrap_or_default();
    let rest: Vec<String> = lines.map(ToString::to_string).collect();

    state.buffer.delete_selection();
    state.buffer.insert_str(first);
    if rest.is_empty() {
        return Outcome::Continue;
    }
    let trailing_newline = rest.last().is_some_and(String::is_empty);
    let count = rest.len() - usize::from(trailing_newline);
    state.paste_queue.extend(rest.into_iter().take(count));
    Outcome::Accept
}

// History.

pub fn previous_history(state: &mut ModeState, _key: KeyPress) -> Outcome {
    if state.history.previous_history(&mut state.buffer) {
        Outcome::Continue
    } else {
        Outcome::Bell
    }
}

pub fn next_history(state: &mut ModeState, _key: KeyPress) -> Outcome {
    if state.history.next_history(&mut state.buffer) {
        Outcome::Continue
    } else {
        Outcome::Bell
    }
}

pub fn beginning_of_history(state: &mut ModeState, _key: KeyPress) -> Outcome {
    state.history.beginning_of_history(&mut state.buffer);
    Outcome::Continue
}

pub fn end_of_history(state: &mut ModeState, _key: KeyPress) -> Outcome {
    state.history.end_of_history(&mut state.buffer);
    Outcome::Continue
}

pub fn reverse_search_history(state: &mut ModeState, _key: KeyPress) -> Outcome {
    start_search(state, SearchDirection::Backward)
}

pub fn forward_search_history(state: &mut ModeState, _key: KeyPress) -> Outcome {
    start_search(state, SearchDirection::Forward)
}

// Completion.

pub fn complete_command(state: &mut ModeState, _key: KeyPress) -> Outcome { complete(state) }

pub fn possible_completions_command(state: &mut ModeState, _key: KeyPress) -> Outcome {
    possible_completions(state)
}

/// Every builtin shared by the built in modes, by bindable name.
pub const COMMON_COMMANDS: &[(&str, BuiltinCommandFn)] = &[
    ("self_insert", self_insert),
    ("accept_line", accept_line),
    ("abort", abort),
    ("clear_screen", clear_screen),
    ("beginning_of_line", beginning_of_line),
    ("end_of_line", end_of_line),
    ("forward_char", forward_char),
    ("backward_char", backward_char),
    ("forward_word", forward_word),
    ("backward_word", backward_word),
    ("delete_char", delete_char),
    ("backward_delete_char", backward_delete_char),
    ("kill_line", kill_line),
    ("backward_kill_line", backward_kill_line),
    ("kill_whole_line", kill_whole_line),
    ("kill_word", kill_word),
    ("backward_kill_word", backward_kill_word),
    ("unix_word_rubout", unix_word_rubout),
    ("yank", yank),
    ("yank_pop", yank_pop),
    ("transpose_chars", transpose_chars),
    ("paste", paste),
    ("previous_history", previous_history),
    ("next_history", next_history),
    ("beginning_of_history", beginning_of_history),
    ("end_of_history", end_of_history),
    ("complete", complete_command),
    ("possible_completions", possible_completions_command),
];

/// Look a builtin up by bindable name in `table`.
#[must_use]
pub fn find_builtin(
    table: &[(&'static str, BuiltinCommandFn)],
    name: &str,
) -> Option<(&'static str, BuiltinCommandFn)> {
    table.iter().find(|(it, _)| *it == name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SpecialKey, TestClipboard, keypress};
    use pretty_assertions::assert_eq;

    fn new_state(clipboard: &TestClipboard, text: &str) -> ModeState {
        let mut state = ModeState::new();
        state.kill_ring.set_clipboard(Box::new(clipboard.clone()));
        state.buffer.set_text(text);
        state
    }

    const KEY: KeyPress = keypress!(@special SpecialKey::Tab);

    #[test]
    fn test_consecutive_kills_grow_one_entry() {
        let clipboard = TestClipboard::default();
        let mut state = new_state(&clipboard, "one two three");
        let kill = crate::Command::builtin("backward_kill_word", backward_kill_word);

        state.run_command(&kill, KEY);
        state.run_command(&kill, KEY);
        assert_eq!(state.buffer.text(), "one ");

        let yank_command = crate::Command::builtin("yank", yank);
        state.run_command(&yank_command, KEY);
        assert_eq!(state.buffer.text(), "one two three");
        assert_eq!(state.kill_ring.len(), 1);
    }

    #[test]
    fn test_yank_pop_cycles_older_kills() {
        let clipboard = TestClipboard::default();
        let mut state = new_state(&clipboard, "");
        state.kill_ring.kill("old");
        state.kill_ring.kill("new");
        let yank_command = crate::Command::builtin("yank", yank);
        let yank_pop_command = crate::Command::builtin("yank_pop", yank_pop);
        let end_command = crate::Command::builtin("end_of_line", end_of_line);

        state.run_command(&yank_command, KEY);
        assert_eq!(state.buffer.text(), "new");
        state.run_command(&yank_pop_command, KEY);
        assert_eq!(state.buffer.text(), "old");

        state.run_command(&end_command, KEY);
        assert_eq!(state.run_command(&yank_pop_command, KEY), CommandOutcome::Bell);
    }

    #[test]
    fn test_unix_word_rubout() {
        let clipboard = TestClipboard::default();
        let mut state = new_state(&clipboard, "ls -la /tmp  ");
        unix_word_rubout(&mut state, KEY);
        assert_eq!(state.buffer.text(), "ls -la ");
    }

    #[test]
    fn test_selection_is_replaced_by_typing() {
        let clipboard = TestClipboard::default();
        let mut state = new_state(&clipboard, "hello world");
        state.buffer.enable_selection = true;
        beginning_of_line(&mut state, KEY);
        forward_word_extend_selection(&mut state, KEY);
        assert_eq!(state.buffer.selected_text(), Some("hello"));

        copy_region_to_clipboard(&mut state, KEY);
        assert_eq!(clipboard.content(), "hello");

        self_insert(&mut state, keypress!(@char 'X'));
        assert_eq!(state.buffer.text(), "X world");
        assert_eq!(state.buffer.mark(), None);
    }

    #[test]
    fn test_multi_line_paste_queues_rest() {
        let clipboard = TestClipboard::new("first\r\nsecond\nthird\n");
        let mut state = new_state(&clipboard, "> ");
        assert_eq!(paste(&mut state, KEY), CommandOutcome::Accept);
        assert_eq!(state.buffer.text(), "> first");
        assert_eq!(
            state.paste_queue.iter().collect::<Vec<_>>(),
            vec!["second", "third"]
        );

        let clipboard = TestClipboard::new("single");
        let mut state = new_state(&clipboard, "");
        assert_eq!(paste(&mut state, KEY), CommandOutcome::Continue);
        assert_eq!(state.buffer.text(), "single");
        assert!(state.paste_queue.is_empty());
    }

    #[test]
    fn test_find_builtin() {
        assert!(find_builtin(COMMON_COMMANDS, "beginning_of_line").is_some());
        assert!(find_builtin(COMMON_COMMANDS, "no_such_thing").is_none());
    }
}
