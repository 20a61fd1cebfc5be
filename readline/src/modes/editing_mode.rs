// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Command, CommandOutcome, EmacsMode, KeyPress, ModeState, ViMode, self_insert};
use std::fmt::Debug;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Names of the built in editing disciplines, in registry order (the first one is the
/// default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EditingModeName {
    Emacs,
    Vi,
}

impl EditingModeName {
    #[must_use]
    pub fn create(self) -> Box<dyn EditingMode> {
        match self {
            EditingModeName::Emacs => Box::new(EmacsMode::new()),
            EditingModeName::Vi => Box::new(ViMode::new()),
        }
    }
}

/// A key binding discipline. Each implementation owns a [`ModeState`] and decides how
/// a key press edits it. The registry keeps one instance per discipline for the whole
/// life of the engine, so switching back and forth keeps each one's buffer, history
/// and bindings.
pub trait EditingMode: Debug + Send {
    fn name(&self) -> &'static str;

    /// Install the default key maps. `argument` is discipline specific and may be
    /// ignored.
    fn init_editing_mode(&mut self, argument: Option<&str>);

    fn state(&self) -> &ModeState;

    fn state_mut(&mut self) -> &mut ModeState;

    /// Edit the buffer for one key press and report what the engine must do next.
    fn process_keyevent(&mut self, key: KeyPress) -> CommandOutcome;

    /// Look up a bindable command by name (`_` separated).
    fn command(&self, name: &str) -> Option<Command>;

    fn command_names(&self) -> Vec<&'static str>;

    /// Called at the start of every read, before the prompt is printed.
    fn readline_setup(&mut self, prompt: &str) { self.state_mut().reset_line(prompt); }

    /// Whether a queued pasted line is complete on its own.
    fn paste_entry_completes_line(&self, _entry: &str) -> bool { true }

    fn cursor_size(&self) -> u8 { self.state().cursor_size }

    /// Human readable settings, one line each.
    fn settings_dump(&self) -> Vec<String> {
        let state = self.state();
        let on_off = |flag: bool| if flag { "on" } else { "off" };

        let mut exit_keys: Vec<String> =
            state.exit_dispatch.iter().map(ToString::to_string).collect();
        exit_keys.sort();

        let mut bindings: Vec<String> = state
            .key_dispatch
            .iter()
            .map(|(key, command)| format!("{key}: {}", command.name))
            .collect();
        bindings.sort();

        let mut lines = vec![
            format!("mode: {}", self.name()),
            format!("show_all_if_ambiguous: {}", on_off(state.show_all_if_ambiguous)),
            format!("mark_directories: {}", on_off(state.mark_directories)),
            format!("complete_filesystem: {}", on_off(state.complete_filesystem)),
            format!("completer_delims: {:?}", state.completer_delims),
            format!("exit keys: {}", exit_keys.join(", ")),
            "bindings:".to_string(),
        ];
        lines.extend(bindings.into_iter().map(|it| format!("  {it}")));
        lines
    }

    fn bind_key(&mut self, key: KeyPress, command: Command) {
        self.state_mut().key_dispatch.insert(key, command);
    }

    /// Returns `false` when the chord was not bound.
    fn unbind_key(&mut self, key: KeyPress) -> bool {
        self.state_mut().key_dispatch.remove(&key).is_some()
    }

    fn bind_exit_key(&mut self, key: KeyPress) { self.state_mut().exit_dispatch.insert(key); }

    fn unbind_exit_key(&mut self, key: KeyPress) -> bool {
        self.state_mut().exit_dispatch.remove(&key)
    }

    /// Insert at point, as if typed.
    fn insert_text(&mut self, text: &str) { self.state_mut().buffer.insert_str(text); }
}

/// Key handling shared by the built in disciplines:
/// 1. An exit chord on an empty line ends input.
/// 2. A bound chord runs its command.
/// 3. An unbound printable character inserts itself. Anything else is ignored.
pub fn dispatch_key(state: &mut ModeState, key: KeyPress) -> CommandOutcome {
    if state.exit_dispatch.contains(&key) && state.buffer.is_empty() {
        return CommandOutcome::EndOfFile;
    }

    if let Some(command) = state.key_dispatch.get(&key).cloned() {
        return state.run_command(&command, key);
    }

    if key.printable_char().is_some() {
        return state.run_command(&Command::builtin("self_insert", self_insert), key);
    }

    tracing::debug!(message = "editing mode -> unbound key", key = %key);
    state.last_command_was_kill = false;
    state.last_yank = None;
    CommandOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ModifierKeysMask, SpecialKey, TestClipboard, beginning_of_line, keypress};
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn mode_state() -> ModeState {
        let mut state = ModeState::new();
        state.kill_ring.set_clipboard(Box::new(TestClipboard::default()));
        state
    }

    #[test]
    fn test_exit_chord_only_on_empty_line() {
        let ctrl_d = keypress!(@char ModifierKeysMask::new().with_ctrl(), 'd');
        let mut state = mode_state();
        state.exit_dispatch.insert(ctrl_d);
        assert_eq!(dispatch_key(&mut state, ctrl_d), CommandOutcome::EndOfFile);

        state.buffer.set_text("x");
        assert_eq!(dispatch_key(&mut state, ctrl_d), CommandOutcome::Continue);
        assert_eq!(state.buffer.text(), "x");
    }

    #[test]
    fn test_bound_then_printable_then_ignored() {
        let ctrl_a = keypress!(@char ModifierKeysMask::new().with_ctrl(), 'a');
        let mut state = mode_state();
        state
            .key_dispatch
            .insert(ctrl_a, Command::builtin("beginning_of_line", beginning_of_line));

        dispatch_key(&mut state, keypress!(@char 'o'));
        dispatch_key(&mut state, keypress!(@char 'k'));
        dispatch_key(&mut state, ctrl_a);
        assert_eq!(state.buffer.point(), 0);

        dispatch_key(&mut state, keypress!(@special SpecialKey::PageUp));
        assert_eq!(state.buffer.text(), "ok");
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(EditingModeName::from_str("VI").unwrap(), EditingModeName::Vi);
        assert_eq!(EditingModeName::Emacs.to_string(), "emacs");
        let name: &'static str = EditingModeName::Vi.into();
        assert_eq!(name, "vi");
    }
}
