// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Command, CommandOutcome, History, IncrementalSearch, KeyPress, KillRing,
            LineBuffer};
use std::{collections::{HashMap, HashSet, VecDeque},
          fmt::{self, Debug, Formatter},
          sync::Arc};

/// Called as `completer(text, state)` for `state` = 0, 1, 2, ... until it returns
/// `None`. Each call returns the next candidate that starts with `text`.
pub type Completer = Arc<dyn Fn(&str, usize) -> Option<String> + Send + Sync + 'static>;

pub const DEFAULT_COMPLETER_DELIMS: &str = " \t\n\"\\'`@$><=;|&{(";
pub const INSERT_CURSOR_SIZE: u8 = 25;
pub const COMMAND_CURSOR_SIZE: u8 = 100;

/// Vi keeps two key maps. Emacs always stays in [`Submode::Insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Submode {
    #[default]
    Insert,
    Command,
}

/// State every editing mode owns: the line being edited, its history, kill ring and
/// dispatch tables, plus the completer and display settings the engine proxies to
/// the active mode.
pub struct ModeState {
    pub buffer: LineBuffer,
    pub history: History,
    pub kill_ring: KillRing,
    pub key_dispatch: HashMap<KeyPress, Command>,
    /// On an empty line these chords end input. Otherwise they fall through to
    /// `key_dispatch`.
    pub exit_dispatch: HashSet<KeyPress>,
    pub prompt: String,
    pub cursor_size: u8,
    pub completer: Option<Completer>,
    pub completer_delims: String,
    /// Bounds (in grapheme clusters) of the text the last completion replaced.
    pub begidx: usize,
    pub endidx: usize,
    /// Lines of a multi line paste that are still to be delivered, one per step.
    pub paste_queue: VecDeque<String>,
    pub mark_directories: bool,
    pub show_all_if_ambiguous: bool,
    pub complete_filesystem: bool,
    pub search: Option<IncrementalSearch>,
    pub submode: Submode,
    /// Set by kill commands so that a run of kills grows one kill ring entry.
    pub last_command_was_kill: bool,
    pub this_command_is_kill: bool,
    /// Bounds of the text the last `yank` / `yank_pop` inserted, while they run in a
    /// row.
    pub last_yank: Option<(usize, usize)>,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            buffer: LineBuffer::new(),
            history: History::new(),
            kill_ring: KillRing::default(),
            key_dispatch: HashMap::new(),
            exit_dispatch: HashSet::new(),
            prompt: String::new(),
            cursor_size: INSERT_CURSOR_SIZE,
            completer: None,
            completer_delims: DEFAULT_COMPLETER_DELIMS.to_string(),
            begidx: 0,
            endidx: 0,
            paste_queue: VecDeque::new(),
            mark_directories: true,
            show_all_if_ambiguous: false,
            complete_filesystem: false,
            search: None,
            submode: Submode::Insert,
            last_command_was_kill: false,
            this_command_is_kill: false,
            last_yank: None,
        }
    }
}

impl Debug for ModeState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeState")
            .field("buffer", &self.buffer)
            .field("history_len", &self.history.len())
            .field("bindings", &self.key_dispatch.len())
            .field("prompt", &self.prompt)
            .field("cursor_size", &self.cursor_size)
            .field("has_completer", &self.completer.is_some())
            .field("paste_queue", &self.paste_queue)
            .field("search", &self.search)
            .field("submode", &self.submode)
            .finish_non_exhaustive()
    }
}

impl ModeState {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// The prompt to paint: the incremental search prompt while a search runs.
    #[must_use]
    pub fn display_prompt(&self) -> String {
        match &self.search {
            Some(search) => search.prompt(),
            None => self.prompt.clone(),
        }
    }

    /// Start a fresh line.
    pub fn reset_line(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
        self.buffer.set_text("");
        self.history.reset_navigation();
        self.search = None;
        self.last_command_was_kill = false;
        self.last_yank = None;
    }

    /// Push killed text, growing the previous entry when the last command also
    /// killed.
    pub fn kill_text(&mut self, text: &str, backward: bool) {
        if self.last_command_was_kill {
            self.kill_ring.kill_append(text, backward);
        } else {
            self.kill_ring.kill(text);
        }
        self.this_command_is_kill = true;
    }

    /// Run one bound command, keeping track of kill runs.
    pub fn run_command(&mut self, command: &Command, key: KeyPress) -> CommandOutcome {
        self.this_command_is_kill = false;
        let outcome = command.run(self, key);
        self.last_command_was_kill = self.this_command_is_kill;
        if !matches!(command.name.as_str(), "yank" | "yank_pop") {
            self.last_yank = None;
        }
        outcome
    }
}
