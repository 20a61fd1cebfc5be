// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{BellStyle, ClipboardService, Clock, Command, CommandOutcome, Completer,
            ConsoleColor, ConsoleSurface, DebugSinks, EditingMode, EngineOptions, Hook,
            InterruptTracker, KeyPress, ModeRegistry, ModeState, ReadlineConfig,
            ReadlineResult, RenderEngine, SystemClock, UninitializedConsole, ok,
            parse_key_description};
use std::{fmt::{self, Debug, Formatter},
          time::Duration};

/// Receives each completed line (with its trailing newline) in the callback protocol.
pub type LineCallback = Box<dyn FnMut(String) + Send>;

/// The line editor: a console surface, the editing modes, the engine options and the
/// render state. See the crate docs for the two read protocols.
///
/// The methods are spread over a few files:
/// - this one: construction and the accessors that proxy to the active mode,
/// - [`crate::engine::bindings`]: `parse_and_bind` and the configuration file,
/// - [`crate::engine::history_facade`]: history of the active mode,
/// - [`crate::engine::input_loop`]: the read protocols.
pub struct Readline {
    pub(crate) console: Box<dyn ConsoleSurface>,
    pub(crate) modes: ModeRegistry,
    pub(crate) options: EngineOptions,
    pub(crate) render: RenderEngine,
    pub(crate) interrupts: InterruptTracker,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) callback: Option<LineCallback>,
    /// Prompt the callback protocol re-runs setup with after each line.
    pub(crate) callback_prompt: String,
    pub(crate) pre_input_pending: bool,
    pub(crate) debug_sinks: DebugSinks,
    pub(crate) config: ReadlineConfig,
}

impl Debug for Readline {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Readline")
            .field("console", &self.console)
            .field("modes", &self.modes)
            .field("options", &self.options)
            .field("render", &self.render)
            .field("has_callback", &self.callback.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Readline {
    /// Build every editing mode, point their history at `config.history_file`, then
    /// run `config.config_file` when it exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReadlineError::Config`] if the configuration file fails.
    pub fn try_new(
        console: Box<dyn ConsoleSurface>,
        config: ReadlineConfig,
    ) -> ReadlineResult<Self> {
        let clock = SystemClock;
        let mut it = Self {
            console,
            modes: ModeRegistry::new(),
            options: EngineOptions::default(),
            render: RenderEngine::new(),
            interrupts: InterruptTracker::new(clock.now()),
            clock: Box::new(clock),
            callback: None,
            callback_prompt: String::new(),
            pre_input_pending: false,
            debug_sinks: DebugSinks::new(),
            config,
        };

        for mode in it.modes.iter_mut() {
            mode.state_mut()
                .history
                .set_history_filename(it.config.history_file.clone());
        }
        if let Some(config_file) = it.config.config_file.clone() {
            it.load_config(Some(&config_file))?;
        }

        for mode in it.modes.iter_mut() {
            for line in mode.settings_dump() {
                tracing::debug!(message = "readline -> settings", mode = mode.name(), %line);
            }
        }
        ok!(it)
    }

    /// An engine with no terminal yet. Configuration and history work, reading input
    /// fails until [`Readline::attach_console`] is called.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReadlineError::Config`] if the configuration file fails.
    pub fn new_detached(config: ReadlineConfig) -> ReadlineResult<Self> {
        Self::try_new(Box::new(UninitializedConsole), config)
    }

    pub fn attach_console(&mut self, console: Box<dyn ConsoleSurface>) {
        self.console = console;
        self.render = RenderEngine::new();
    }

    /// Use another source of time for the interrupt tap window.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.interrupts.reset(clock.now());
        self.clock = Box::new(clock);
        self
    }

    /// Sinks switched by the `debug_output` configuration function. Pass the same
    /// (cloned) sinks to [`crate::TracingConfig::with_debug_sinks`].
    #[must_use]
    pub fn with_debug_sinks(mut self, debug_sinks: DebugSinks) -> Self {
        self.debug_sinks = debug_sinks;
        self
    }

    #[must_use]
    pub fn debug_sinks(&self) -> &DebugSinks { &self.debug_sinks }

    #[must_use]
    pub fn config(&self) -> &ReadlineConfig { &self.config }

    #[must_use]
    pub fn options(&self) -> &EngineOptions { &self.options }

    #[must_use]
    pub fn render_engine(&self) -> &RenderEngine { &self.render }

    // Modes.

    #[must_use]
    pub fn modes(&self) -> &ModeRegistry { &self.modes }

    pub fn modes_mut(&mut self) -> &mut ModeRegistry { &mut self.modes }

    #[must_use]
    pub fn active_mode(&self) -> &dyn EditingMode { self.modes.active() }

    /// # Errors
    ///
    /// Returns [`crate::ReadlineError::UnknownMode`] if no mode has this name.
    pub fn switch_mode(&mut self, name: &str) -> ReadlineResult<()> {
        self.modes.switch_mode(name)
    }

    #[must_use]
    pub fn prompt(&self) -> &str { self.modes.prompt() }

    pub fn set_prompt(&mut self, prompt: &str) { self.modes.set_prompt(prompt); }

    /// `None` removes the completer.
    pub fn set_completer(&mut self, completer: Option<Completer>) {
        self.modes.set_completer(completer);
    }

    #[must_use]
    pub fn get_completer(&self) -> Option<Completer> { self.modes.completer() }

    #[must_use]
    pub fn get_completer_delims(&self) -> &str { self.modes.completer_delims() }

    pub fn set_completer_delims(&mut self, delims: &str) {
        self.modes.set_completer_delims(delims);
    }

    #[must_use]
    pub fn get_begidx(&self) -> usize { self.modes.begidx() }

    #[must_use]
    pub fn get_endidx(&self) -> usize { self.modes.endidx() }

    pub fn set_startup_hook(&mut self, hook: Option<Hook>) { self.modes.set_startup_hook(hook); }

    pub fn set_pre_input_hook(&mut self, hook: Option<Hook>) {
        self.modes.set_pre_input_hook(hook);
    }

    /// Text of the active mode's buffer.
    #[must_use]
    pub fn get_line_buffer(&self) -> String { self.modes.active().state().buffer.text().to_string() }

    /// Insert at point in the active buffer. Shows up on the next render pass.
    pub fn insert_text(&mut self, text: &str) { self.modes.active_mut().insert_text(text); }

    /// Bind `chord` on the active mode to a host supplied command.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReadlineError::InvalidKeyDescription`] if `chord` can't be
    /// parsed.
    pub fn bind_command(
        &mut self,
        chord: &str,
        name: &str,
        function: impl Fn(&mut ModeState, KeyPress) -> CommandOutcome + Send + Sync + 'static,
    ) -> ReadlineResult<()> {
        let key = parse_key_description(chord)?;
        self.modes.active_mut().bind_key(key, Command::custom(name, function));
        tracing::debug!(message = "readline -> custom command bound", %key, command = name);
        ok!()
    }

    // Engine options.

    pub fn set_bell_style(&mut self, style: BellStyle) { self.options.bell_style = style; }

    pub fn set_allow_ctrl_c(&mut self, allowed: bool) { self.options.interrupts_allowed = allowed; }

    pub fn set_ctrl_c_tap_time_interval(&mut self, window: Duration) {
        self.options.tap_window = window;
    }

    /// `None` keeps the terminal's color.
    pub fn set_prompt_color(&mut self, color: Option<ConsoleColor>) {
        self.options.prompt_color = color;
    }

    /// `None` keeps the terminal's color.
    pub fn set_input_color(&mut self, color: Option<ConsoleColor>) {
        self.options.command_color = color;
    }

    /// Applies to every mode's kill ring.
    pub fn set_kill_ring_to_clipboard(&mut self, on: bool) {
        for mode in self.modes.iter_mut() {
            mode.state_mut().kill_ring.to_clipboard = on;
        }
    }

    /// Replace the clipboard of every mode's kill ring.
    pub fn set_clipboard(&mut self, clipboard: impl ClipboardService + Clone + 'static) {
        for mode in self.modes.iter_mut() {
            mode.state_mut()
                .kill_ring
                .set_clipboard(Box::new(clipboard.clone()));
        }
    }
}
