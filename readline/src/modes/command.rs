// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{KeyPress, ModeState};
use std::{fmt::{self, Debug, Formatter},
          sync::Arc};

/// What a key press asks the engine to do after the buffer was edited.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommandOutcome {
    #[default]
    Continue,
    /// The line is complete.
    Accept,
    /// Ring the bell (subject to the bell style).
    Bell,
    /// The exit chord was pressed on an empty line.
    EndOfFile,
    /// Print the candidates below the line, then redraw the prompt.
    ShowCompletions(Vec<String>),
    ClearScreen,
}

pub type BuiltinCommandFn = fn(&mut ModeState, KeyPress) -> CommandOutcome;

pub type CustomCommandFn =
    Arc<dyn Fn(&mut ModeState, KeyPress) -> CommandOutcome + Send + Sync + 'static>;

#[derive(Clone)]
pub enum CommandAction {
    Builtin(BuiltinCommandFn),
    /// Supplied by the host, see [`crate::Readline::bind_command`].
    Custom(CustomCommandFn),
}

/// A bindable, named editing command.
#[derive(Clone)]
pub struct Command {
    pub name: String,
    pub action: CommandAction,
}

impl Command {
    #[must_use]
    pub fn builtin(name: &str, function: BuiltinCommandFn) -> Self {
        Self {
            name: name.to_string(),
            action: CommandAction::Builtin(function),
        }
    }

    pub fn custom(
        name: &str,
        function: impl Fn(&mut ModeState, KeyPress) -> CommandOutcome + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            action: CommandAction::Custom(Arc::new(function)),
        }
    }

    pub fn run(&self, state: &mut ModeState, key: KeyPress) -> CommandOutcome {
        match &self.action {
            CommandAction::Builtin(function) => function(state, key),
            CommandAction::Custom(function) => function(state, key),
        }
    }
}

impl Debug for CommandAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CommandAction::Builtin(_) => f.write_str("Builtin"),
            CommandAction::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl Debug for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Command({}, {:?})", self.name, self.action)
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool { self.name == other.name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn noop(_state: &mut ModeState, _key: KeyPress) -> CommandOutcome { CommandOutcome::Continue }

    #[test]
    fn test_debug_names_the_kind() {
        let builtin = Command::builtin("noop", noop);
        let custom = Command::custom("host", |_, _| CommandOutcome::Accept);
        assert_eq!(format!("{builtin:?}"), "Command(noop, Builtin)");
        assert_eq!(format!("{:?}", custom.action), "Custom");
        assert_eq!(custom.run(&mut ModeState::new(), KeyPress::ctrl_c()), CommandOutcome::Accept);
    }
}
