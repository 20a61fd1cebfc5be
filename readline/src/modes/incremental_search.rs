// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Incremental history search (`Control-r` / `Control-s`).
//!
//! While a search runs, keys edit the query instead of the line:
//! - printable characters extend the query, `BackSpace` shortens it,
//! - `Control-r` / `Control-s` jump to the next older / newer match,
//! - `Control-g` / `Control-c` cancel and restore the line as it was,
//! - any other key ends the search, keeps the matched line, and is then handled as
//!   usual (so `Return` accepts the match).

use crate::{CommandOutcome, KeyPress, ModeState, ModifierKeysMask, SearchDirection,
            SpecialKey, keypress};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementalSearch {
    pub direction: SearchDirection,
    pub query: String,
    /// History index of the current match.
    pub match_index: Option<usize>,
    pub failed: bool,
    saved_text: String,
    saved_point: usize,
}

impl IncrementalSearch {
    #[must_use]
    pub fn prompt(&self) -> String {
        let failed = if self.failed { "failed " } else { "" };
        let kind = match self.direction {
            SearchDirection::Backward => "reverse-i-search",
            SearchDirection::Forward => "i-search",
        };
        format!("({failed}{kind})`{}': ", self.query)
    }
}

pub fn start_search(state: &mut ModeState, direction: SearchDirection) -> CommandOutcome {
    state.search = Some(IncrementalSearch {
        direction,
        query: String::new(),
        match_index: None,
        failed: false,
        saved_text: state.buffer.text().to_string(),
        saved_point: state.buffer.point(),
    });
    CommandOutcome::Continue
}

/// Returns `None` when the key ended the search and must be handled as usual.
pub fn process_search_key(state: &mut ModeState, key: KeyPress) -> Option<CommandOutcome> {
    let ctrl = ModifierKeysMask::new().with_ctrl();
    let mut search = state.search.take()?;

    if key == keypress!(@char ctrl, 'g') || key == keypress!(@char ctrl, 'c') {
        state.buffer.set_text(&search.saved_text);
        state.buffer.set_point(search.saved_point);
        return Some(CommandOutcome::Continue);
    }

    let len = state.history.len();
    let (start, direction) = if key == keypress!(@char ctrl, 'r') {
        let start = search.match_index.map_or(len, |it| it.saturating_sub(1));
        let start = if search.match_index == Some(0) { None } else { Some(start) };
        (start, SearchDirection::Backward)
    } else if key == keypress!(@char ctrl, 's') {
        (
            Some(search.match_index.map_or(0, |it| it + 1)),
            SearchDirection::Forward,
        )
    } else if key == keypress!(@special SpecialKey::Backspace) {
        search.query.pop();
        (Some(restart_index(&search, len)), search.direction)
    } else if let Some(ch) = key.printable_char() {
        search.query.push(ch);
        (
            Some(search.match_index.unwrap_or(restart_index(&search, len))),
            search.direction,
        )
    } else {
        state.history.reset_navigation();
        return None;
    };

    search.direction = direction;
    let found = start.and_then(|start| match direction {
        SearchDirection::Forward if start >= len => None,
        _ => state.history.search(&search.query, start, direction),
    });
    match found {
        Some(index) => {
            let entry = state.history.entries()[index].clone();
            let point = entry
                .find(&search.query)
                .map_or(0, |byte| entry[..byte].graphemes(true).count());
            state.buffer.set_text(&entry);
            state.buffer.set_point(point);
            search.match_index = Some(index);
            search.failed = false;
        }
        None => search.failed = true,
    }

    let outcome = if search.failed {
        CommandOutcome::Bell
    } else {
        CommandOutcome::Continue
    };
    state.search = Some(search);
    Some(outcome)
}

fn restart_index(search: &IncrementalSearch, len: usize) -> usize {
    match search.direction {
        SearchDirection::Backward => len,
        SearchDirection::Forward => 0,
    }
}
