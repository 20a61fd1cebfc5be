// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Vi style editing. Two key maps:
//! - insert submode ([`ModeState::key_dispatch`], where host bindings go): typing
//!   inserts, `Escape` switches to command submode.
//! - command submode: motions, deletes, the `d` operator, history, and the keys that
//!   go back to insert submode.
//!
//! Selection painting is off in this discipline.

use crate::{BuiltinCommandFn, COMMAND_CURSOR_SIZE, COMMON_COMMANDS, Command, CommandOutcome,
            EditingMode, EditingModeName, INSERT_CURSOR_SIZE, KeyPress, LineBuffer,
            ModeState, ModifierKeysMask, SpecialKey, Submode, dispatch_key, find_builtin,
            keypress};
use std::collections::HashMap;

pub fn vi_command_mode(state: &mut ModeState, _key: KeyPress) -> CommandOutcome {
    state.submode = Submode::Command;
    state.cursor_size = COMMAND_CURSOR_SIZE;
    state.buffer.backward_char();
    CommandOutcome::Continue
}

pub fn vi_insert_mode(state: &mut ModeState, _key: KeyPress) -> CommandOutcome {
    enter_insert(state);
    CommandOutcome::Continue
}

pub fn vi_append_mode(state: &mut ModeState, _key: KeyPress) -> CommandOutcome {
    state.buffer.forward_char();
    enter_insert(state);
    CommandOutcome::Continue
}

pub fn vi_insert_beginning_of_line(state: &mut ModeState, _key: KeyPress) -> CommandOutcome {
    state.buffer.beginning_of_line();
    enter_insert(state);
    CommandOutcome::Continue
}

pub fn vi_append_eol(state: &mut ModeState, _key: KeyPress) -> CommandOutcome {
    state.buffer.end_of_line();
    enter_insert(state);
    CommandOutcome::Continue
}

pub fn vi_next_word(state: &mut ModeState, _key: KeyPress) -> CommandOutcome {
    let target = state.buffer.next_word_start();
    state.buffer.set_point(target);
    CommandOutcome::Continue
}

fn enter_insert(state: &mut ModeState) {
    state.submode = Submode::Insert;
    state.cursor_size = INSERT_CURSOR_SIZE;
}

pub const VI_COMMANDS: &[(&str, BuiltinCommandFn)] = &[
    ("vi_command_mode", vi_command_mode),
    ("vi_insert_mode", vi_insert_mode),
    ("vi_append_mode", vi_append_mode),
    ("vi_insert_beginning_of_line", vi_insert_beginning_of_line),
    ("vi_append_eol", vi_append_eol),
    ("vi_next_word", vi_next_word),
];

#[derive(Debug, Default)]
pub struct ViMode {
    state: ModeState,
    command_dispatch: HashMap<KeyPress, Command>,
    /// `d` was pressed and waits for its motion.
    pending_delete: bool,
}

impl ViMode {
    /// A mode with the default key maps installed, in insert submode.
    #[must_use]
    pub fn new() -> Self {
        let mut it = Self::default();
        it.init_editing_mode(None);
        it
    }

    #[must_use]
    pub fn submode(&self) -> Submode { self.state.submode }

    /// Where the `d` operator followed by `key` deletes to.
    fn delete_target(buffer: &LineBuffer, key: KeyPress) -> Option<usize> {
        let point = buffer.point();
        match key.printable_char()? {
            'w' => Some(buffer.next_word_start()),
            'b' => Some(buffer.previous_word_start()),
            '$' => Some(buffer.len()),
            '0' => Some(0),
            'h' => Some(point.saturating_sub(1)),
            'l' => Some((point + 1).min(buffer.len())),
            _ => None,
        }
    }

    fn process_delete_motion(&mut self, key: KeyPress) -> CommandOutcome {
        self.pending_delete = false;
        let state = &mut self.state;
        if key == keypress!(@char 'd') {
            let killed = state.buffer.delete_range(0, state.buffer.len());
            state.kill_text(&killed, false);
            return CommandOutcome::Continue;
        }
        let Some(target) = Self::delete_target(&state.buffer, key) else {
            return CommandOutcome::Bell;
        };
        let point = state.buffer.point();
        let killed = state.buffer.delete_range(point, target);
        state.buffer.set_point(point.min(target));
        state.kill_text(&killed, target < point);
        CommandOutcome::Continue
    }

    fn process_command_key(&mut self, key: KeyPress) -> CommandOutcome {
        if self.pending_delete {
            return self.process_delete_motion(key);
        }
        if key == keypress!(@char 'd') {
            self.pending_delete = true;
            return CommandOutcome::Continue;
        }
        if self.state.exit_dispatch.contains(&key) && self.state.buffer.is_empty() {
            return CommandOutcome::EndOfFile;
        }
        match self.command_dispatch.get(&key).cloned() {
            Some(command) => self.state.run_command(&command, key),
            None => CommandOutcome::Bell,
        }
    }
}

#[rustfmt::skip]
fn insert_bindings() -> Vec<(KeyPress, &'static str)> {
    use SpecialKey::{Backspace, Delete, Down, End, Enter, Esc, Home, Left, Right, Tab, Up};
    let ctrl = ModifierKeysMask::new().with_ctrl();
    vec![
        (keypress!(@special Esc), "vi_command_mode"),
        (keypress!(@special Backspace), "backward_delete_char"),
        (keypress!(@special Delete), "delete_char"),
        (keypress!(@special Enter), "accept_line"),
        (keypress!(@special Left), "backward_char"),
        (keypress!(@special Right), "forward_char"),
        (keypress!(@special Home), "beginning_of_line"),
        (keypress!(@special End), "end_of_line"),
        (keypress!(@special Up), "previous_history"),
        (keypress!(@special Down), "next_history"),
        (keypress!(@special Tab), "complete"),
        (keypress!(@char ctrl, 'w'), "unix_word_rubout"),
        (keypress!(@char ctrl, 'u'), "backward_kill_line"),
        (keypress!(@char ctrl, 'l'), "clear_screen"),
        (keypress!(@char ctrl, 'c'), "abort"),
    ]
}

#[rustfmt::skip]
fn command_bindings() -> Vec<(KeyPress, &'static str)> {
    use SpecialKey::{Enter, Left, Right};
    let ctrl = ModifierKeysMask::new().with_ctrl();
    vec![
        (keypress!(@char 'h'), "backward_char"),
        (keypress!(@special Left), "backward_char"),
        (keypress!(@char 'l'), "forward_char"),
        (keypress!(@special Right), "forward_char"),
        (keypress!(@char '0'), "beginning_of_line"),
        (keypress!(@char '$'), "end_of_line"),
        (keypress!(@char 'w'), "vi_next_word"),
        (keypress!(@char 'b'), "backward_word"),
        (keypress!(@char 'x'), "delete_char"),
        (keypress!(@char 'D'), "kill_line"),
        (keypress!(@char 'p'), "yank"),
        (keypress!(@char 'i'), "vi_insert_mode"),
        (keypress!(@char 'a'), "vi_append_mode"),
        (keypress!(@char 'I'), "vi_insert_beginning_of_line"),
        (keypress!(@char 'A'), "vi_append_eol"),
        (keypress!(@char 'k'), "previous_history"),
        (keypress!(@char 'j'), "next_history"),
        (keypress!(@special Enter), "accept_line"),
        (keypress!(@char ctrl, 'l'), "clear_screen"),
        (keypress!(@char ctrl, 'c'), "abort"),
    ]
}

impl EditingMode for ViMode {
    fn name(&self) -> &'static str { EditingModeName::Vi.into() }

    fn init_editing_mode(&mut self, _argument: Option<&str>) {
        let resolve = |bindings: Vec<(KeyPress, &'static str)>| -> HashMap<KeyPress, Command> {
            bindings
                .into_iter()
                .filter_map(|(key, name)| self.command(name).map(|it| (key, it)))
                .collect()
        };
        let insert = resolve(insert_bindings());
        let command = resolve(command_bindings());
        self.state.key_dispatch = insert;
        self.command_dispatch = command;
        self.state.exit_dispatch.clear();
        self.state
            .exit_dispatch
            .insert(keypress!(@char ModifierKeysMask::new().with_ctrl(), 'd'));
        self.state.buffer.enable_selection = false;
        enter_insert(&mut self.state);
    }

    fn state(&self) -> &ModeState { &self.state }

    fn state_mut(&mut self) -> &mut ModeState { &mut self.state }

    fn readline_setup(&mut self, prompt: &str) {
        self.state.reset_line(prompt);
        self.pending_delete = false;
        enter_insert(&mut self.state);
    }

    fn process_keyevent(&mut self, key: KeyPress) -> CommandOutcome {
        match self.state.submode {
            Submode::Insert => dispatch_key(&mut self.state, key),
            Submode::Command => self.process_command_key(key),
        }
    }

    fn command(&self, name: &str) -> Option<Command> {
        find_builtin(COMMON_COMMANDS, name)
            .or_else(|| find_builtin(VI_COMMANDS, name))
            .map(|(name, function)| Command::builtin(name, function))
    }

    fn command_names(&self) -> Vec<&'static str> {
        COMMON_COMMANDS
            .iter()
            .chain(VI_COMMANDS)
            .map(|(name, _)| *name)
            .collect()
    }
}
