// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BuiltinCommandFn, COMMON_COMMANDS, Command, CommandOutcome, EditingMode,
            EditingModeName, KeyPress, ModeState, ModifierKeysMask, SpecialKey,
            backward_char_extend_selection, backward_word_extend_selection,
            beginning_of_line_extend_selection, copy_region_to_clipboard, dispatch_key,
            end_of_line_extend_selection, find_builtin, forward_char_extend_selection,
            forward_search_history, forward_word_extend_selection, keypress, kill_region,
            process_search_key, reverse_search_history};

/// Commands only the emacs discipline offers, on top of [`COMMON_COMMANDS`].
pub const EMACS_COMMANDS: &[(&str, BuiltinCommandFn)] = &[
    ("forward_char_extend_selection", forward_char_extend_selection),
    ("backward_char_extend_selection", backward_char_extend_selection),
    ("forward_word_extend_selection", forward_word_extend_selection),
    ("backward_word_extend_selection", backward_word_extend_selection),
    ("beginning_of_line_extend_selection", beginning_of_line_extend_selection),
    ("end_of_line_extend_selection", end_of_line_extend_selection),
    ("kill_region", kill_region),
    ("copy_region_to_clipboard", copy_region_to_clipboard),
    ("reverse_search_history", reverse_search_history),
    ("forward_search_history", forward_search_history),
];

/// Emacs style editing, the default discipline. `Control-d` ends input on an empty
/// line and deletes forward otherwise.
#[derive(Debug, Default)]
pub struct EmacsMode {
    state: ModeState,
}

impl EmacsMode {
    /// A mode with the default key map installed.
    #[must_use]
    pub fn new() -> Self {
        let mut it = Self::default();
        it.init_editing_mode(None);
        it
    }
}

#[rustfmt::skip]
fn default_bindings() -> Vec<(KeyPress, &'static str)> {
    use SpecialKey::{Backspace, Delete, Down, End, Enter, Home, Left, Right, Tab, Up};
    let ctrl = ModifierKeysMask::new().with_ctrl();
    let meta = ModifierKeysMask::new().with_alt();
    let shift = ModifierKeysMask::new().with_shift();
    let ctrl_shift = ModifierKeysMask::new().with_ctrl().with_shift();

    vec![
        // Motion.
        (keypress!(@char ctrl, 'a'), "beginning_of_line"),
        (keypress!(@special Home), "beginning_of_line"),
        (keypress!(@char ctrl, 'e'), "end_of_line"),
        (keypress!(@special End), "end_of_line"),
        (keypress!(@char ctrl, 'f'), "forward_char"),
        (keypress!(@special Right), "forward_char"),
        (keypress!(@char ctrl, 'b'), "backward_char"),
        (keypress!(@special Left), "backward_char"),
        (keypress!(@char meta, 'f'), "forward_word"),
        (keypress!(@special ctrl, Right), "forward_word"),
        (keypress!(@char meta, 'b'), "backward_word"),
        (keypress!(@special ctrl, Left), "backward_word"),
        // Selection.
        (keypress!(@special shift, Right), "forward_char_extend_selection"),
        (keypress!(@special shift, Left), "backward_char_extend_selection"),
        (keypress!(@special ctrl_shift, Right), "forward_word_extend_selection"),
        (keypress!(@special ctrl_shift, Left), "backward_word_extend_selection"),
        (keypress!(@special shift, Home), "beginning_of_line_extend_selection"),
        (keypress!(@special shift, End), "end_of_line_extend_selection"),
        // Deletes and kills.
        (keypress!(@special Backspace), "backward_delete_char"),
        (keypress!(@char ctrl, 'h'), "backward_delete_char"),
        (keypress!(@special Delete), "delete_char"),
        (keypress!(@char ctrl, 'd'), "delete_char"),
        (keypress!(@char ctrl, 'k'), "kill_line"),
        (keypress!(@char ctrl, 'u'), "backward_kill_line"),
        (keypress!(@char meta, 'd'), "kill_word"),
        (keypress!(@special meta, Backspace), "backward_kill_word"),
        (keypress!(@char ctrl, 'w'), "kill_region"),
        (keypress!(@char ctrl, 'y'), "yank"),
        (keypress!(@char meta, 'y'), "yank_pop"),
        (keypress!(@char ctrl, 't'), "transpose_chars"),
        // Clipboard.
        (keypress!(@char meta, 'w'), "copy_region_to_clipboard"),
        (keypress!(@char ctrl, 'v'), "paste"),
        // History.
        (keypress!(@char ctrl, 'p'), "previous_history"),
        (keypress!(@special Up), "previous_history"),
        (keypress!(@char ctrl, 'n'), "next_history"),
        (keypress!(@special Down), "next_history"),
        (keypress!(@char meta, '<'), "beginning_of_history"),
        (keypress!(@char meta, '>'), "end_of_history"),
        (keypress!(@char ctrl, 'r'), "reverse_search_history"),
        (keypress!(@char ctrl, 's'), "forward_search_history"),
        // Completion.
        (keypress!(@special Tab), "complete"),
        (keypress!(@char meta, '?'), "possible_completions"),
        // Line.
        (keypress!(@special Enter), "accept_line"),
        (keypress!(@char ctrl, 'l'), "clear_screen"),
        (keypress!(@char ctrl, 'g'), "abort"),
        (keypress!(@char ctrl, 'c'), "abort"),
    ]
}

impl EditingMode for EmacsMode {
    fn name(&self) -> &'static str { EditingModeName::Emacs.into() }

    fn init_editing_mode(&mut self, _argument: Option<&str>) {
        self.state.key_dispatch.clear();
        for (key, name) in default_bindings() {
            if let Some(command) = self.command(name) {
                self.state.key_dispatch.insert(key, command);
            }
        }
        self.state.exit_dispatch.clear();
        self.state
            .exit_dispatch
            .insert(keypress!(@char ModifierKeysMask::new().with_ctrl(), 'd'));
        self.state.buffer.enable_selection = true;
    }

    fn state(&self) -> &ModeState { &self.state }

    fn state_mut(&mut self) -> &mut ModeState { &mut self.state }

    fn process_keyevent(&mut self, key: KeyPress) -> CommandOutcome {
        if self.state.search.is_some()
            && let Some(outcome) = process_search_key(&mut self.state, key)
        {
            return outcome;
        }
        dispatch_key(&mut self.state, key)
    }

    fn command(&self, name: &str) -> Option<Command> {
        find_builtin(COMMON_COMMANDS, name)
            .or_else(|| find_builtin(EMACS_COMMANDS, name))
            .map(|(name, function)| Command::builtin(name, function))
    }

    fn command_names(&self) -> Vec<&'static str> {
        COMMON_COMMANDS
            .iter()
            .chain(EMACS_COMMANDS)
            .map(|(name, _)| *name)
            .collect()
    }
}
