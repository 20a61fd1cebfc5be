// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{Completer, EditingMode, EditingModeName, ReadlineError, ReadlineResult, ok};
use std::fmt::{self, Debug, Formatter};
use strum::IntoEnumIterator;

/// A nullary callback run by the input loop. See [`ModeRegistry::set_startup_hook`].
pub type Hook = Box<dyn FnMut() + Send>;

/// The ordered editing modes, which one is active, and the hooks. Prompt and
/// completer accessors proxy to the active mode.
pub struct ModeRegistry {
    /// Never empty.
    modes: Vec<Box<dyn EditingMode>>,
    active: usize,
    startup_hook: Option<Hook>,
    pre_input_hook: Option<Hook>,
}

impl Debug for ModeRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeRegistry")
            .field("modes", &self.mode_names())
            .field("active", &self.active_name())
            .field("startup_hook", &self.startup_hook.is_some())
            .field("pre_input_hook", &self.pre_input_hook.is_some())
            .finish()
    }
}

impl Default for ModeRegistry {
    /// Every built in mode, initialized, with the first one active.
    fn default() -> Self {
        let modes = EditingModeName::iter()
            .map(|name| {
                let mut mode = name.create();
                mode.init_editing_mode(None);
                mode
            })
            .collect();
        Self {
            modes,
            active: 0,
            startup_hook: None,
            pre_input_hook: None,
        }
    }
}

impl ModeRegistry {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Add a mode after the built in ones. A mode with the same name replaces the
    /// registered one.
    pub fn register(&mut self, mut mode: Box<dyn EditingMode>) {
        mode.init_editing_mode(None);
        match self.modes.iter().position(|it| it.name() == mode.name()) {
            Some(index) => self.modes[index] = mode,
            None => self.modes.push(mode),
        }
    }

    #[must_use]
    pub fn active(&self) -> &dyn EditingMode { self.modes[self.active].as_ref() }

    pub fn active_mut(&mut self) -> &mut dyn EditingMode { self.modes[self.active].as_mut() }

    #[must_use]
    pub fn active_name(&self) -> &'static str { self.active().name() }

    #[must_use]
    pub fn mode_names(&self) -> Vec<&'static str> {
        self.modes.iter().map(|it| it.name()).collect()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool { self.modes.iter().any(|it| it.name() == name) }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn EditingMode>> {
        self.modes.iter_mut()
    }

    /// Change which mode handles input. Each mode keeps its own state.
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::UnknownMode`] if no mode has this name.
    pub fn switch_mode(&mut self, name: &str) -> ReadlineResult<()> {
        let index = self
            .modes
            .iter()
            .position(|it| it.name() == name)
            .ok_or_else(|| ReadlineError::UnknownMode(name.to_string()))?;
        if index != self.active {
            tracing::debug!(
                message = "mode registry -> switch mode",
                from = self.active_name(),
                to = name
            );
        }
        self.active = index;
        ok!()
    }

    #[must_use]
    pub fn prompt(&self) -> &str { &self.active().state().prompt }

    pub fn set_prompt(&mut self, prompt: &str) {
        self.active_mut().state_mut().prompt = prompt.to_string();
    }

    /// `None` removes the completer.
    pub fn set_completer(&mut self, completer: Option<Completer>) {
        self.active_mut().state_mut().completer = completer;
    }

    #[must_use]
    pub fn completer(&self) -> Option<Completer> { self.active().state().completer.clone() }

    #[must_use]
    pub fn completer_delims(&self) -> &str { &self.active().state().completer_delims }

    pub fn set_completer_delims(&mut self, delims: &str) {
        self.active_mut().state_mut().completer_delims = delims.to_string();
    }

    /// Start of the scope of the last completion attempt.
    #[must_use]
    pub fn begidx(&self) -> usize { self.active().state().begidx }

    /// End of the scope of the last completion attempt.
    #[must_use]
    pub fn endidx(&self) -> usize { self.active().state().endidx }

    /// Run just before each read prints its prompt. `None` removes it.
    pub fn set_startup_hook(&mut self, hook: Option<Hook>) { self.startup_hook = hook; }

    /// Run after the prompt is printed, just before the first key of the read is
    /// read. `None` removes it.
    pub fn set_pre_input_hook(&mut self, hook: Option<Hook>) { self.pre_input_hook = hook; }

    pub fn run_startup_hook(&mut self) {
        if let Some(hook) = self.startup_hook.as_mut() {
            hook();
        }
    }

    pub fn run_pre_input_hook(&mut self) {
        if let Some(hook) = self.pre_input_hook.as_mut() {
            hook();
        }
    }
}
