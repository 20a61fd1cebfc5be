// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The two read protocols and the single step they share.
//!
//! One step:
//! 1. If the active mode has pasted lines queued, the next one replaces the buffer and
//!    the mode decides whether it completes the line.
//! 2. Otherwise block for one console event. An abort signal goes through the
//!    [`crate::InterruptTracker`]: it either aborts the read or turns into a
//!    `Control-c` key press.
//! 3. The active mode processes the key, then the line is rendered again.

use crate::{CommandOutcome, ConsoleEvent, Readline, ReadlineError, ReadlineResult,
            TapOutcome, ok, ring_bell};

impl Readline {
    /// Block until a line is complete and return it with a trailing newline. The line
    /// is added to the active mode's history.
    ///
    /// Must not be called while a callback is installed.
    ///
    /// # Errors
    ///
    /// - [`ReadlineError::Aborted`] on Ctrl+C, see [`crate::InterruptTracker`].
    /// - [`ReadlineError::EndOfFile`] when the exit chord is pressed on an empty line.
    /// - [`ReadlineError::UnsupportedBellStyle`] when the bell rings in an unsupported
    ///   style.
    /// - [`ReadlineError::Unimplemented`] on an engine without a console surface.
    pub fn read_line(&mut self, prompt: &str) -> ReadlineResult<String> {
        debug_assert!(
            self.callback.is_none(),
            "read_line called while a line callback is installed"
        );
        if !self.console.is_attached() {
            return Err(ReadlineError::Unimplemented {
                operation: "read_line",
            });
        }

        self.readline_setup(prompt)?;
        while !self.step()? {}
        self.finish_line()
    }

    /// Start the callback protocol: print `prompt` and return without reading. The
    /// host then calls [`Readline::read_char_step`] when
    /// [`Readline::event_available`] says so. Each completed line is added to history
    /// and passed to `callback`, and a fresh prompt is printed.
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::Unimplemented`] on an engine without a console
    /// surface, or an error if the prompt can't be printed.
    pub fn install_callback(
        &mut self,
        prompt: &str,
        callback: impl FnMut(String) + Send + 'static,
    ) -> ReadlineResult<()> {
        if !self.console.is_attached() {
            return Err(ReadlineError::Unimplemented {
                operation: "install_callback",
            });
        }
        self.callback = Some(Box::new(callback));
        self.callback_prompt = prompt.to_string();
        tracing::debug!(message = "readline -> callback installed", prompt);
        self.readline_setup(prompt)
    }

    /// Later calls to [`Readline::read_char_step`] do nothing.
    pub fn remove_callback(&mut self) {
        if self.callback.take().is_some() {
            tracing::debug!(message = "readline -> callback removed");
        }
    }

    /// Run exactly one step of the callback protocol. Does nothing when no callback is
    /// installed.
    ///
    /// # Errors
    ///
    /// The same as [`Readline::read_line`].
    pub fn read_char_step(&mut self) -> ReadlineResult<()> {
        if self.callback.is_none() {
            return ok!();
        }
        if !self.step()? {
            return ok!();
        }

        let line = self.finish_line()?;
        if let Some(mut callback) = self.callback.take() {
            callback(line);
            self.callback = Some(callback);
        }
        let prompt = self.callback_prompt.clone();
        self.readline_setup(&prompt)
    }

    /// Whether a step would make progress without blocking: pasted lines are queued
    /// or the console has input pending.
    ///
    /// # Errors
    ///
    /// Returns an error if the console can't be polled.
    pub fn event_available(&mut self) -> ReadlineResult<bool> {
        if !self.modes.active().state().paste_queue.is_empty() {
            return ok!(true);
        }
        self.console.peek()
    }

    fn readline_setup(&mut self, prompt: &str) -> ReadlineResult<()> {
        self.modes.active_mut().readline_setup(prompt);
        self.modes.run_startup_hook();

        let prompt = self.modes.active().state().display_prompt();
        self.render
            .print_prompt(self.console.as_mut(), &prompt, self.options.prompt_style())?;
        self.update_line()?;

        self.pre_input_pending = true;
        self.interrupts.reset(self.clock.now());
        ok!()
    }

    /// Returns `true` when the line is complete.
    fn step(&mut self) -> ReadlineResult<bool> {
        let mode = self.modes.active_mut();
        if let Some(entry) = mode.state_mut().paste_queue.pop_front() {
            mode.state_mut().buffer.set_text(&entry);
            let complete = mode.paste_entry_completes_line(&entry);
            tracing::debug!(message = "readline -> pasted line", %entry, complete);
            self.update_line()?;
            return ok!(complete);
        }

        if std::mem::take(&mut self.pre_input_pending) {
            self.modes.run_pre_input_hook();
        }

        let key = match self.console.read_event()? {
            ConsoleEvent::Key(key) => key,
            ConsoleEvent::Abort => match self.interrupts.on_abort(&self.options, self.clock.now()) {
                TapOutcome::Swallowed(key) => key,
                TapOutcome::Abort => {
                    tracing::debug!(message = "readline -> read aborted");
                    return Err(ReadlineError::Aborted);
                }
            },
        };

        let complete = match self.modes.active_mut().process_keyevent(key) {
            CommandOutcome::Continue => false,
            CommandOutcome::Accept => true,
            CommandOutcome::Bell => {
                ring_bell(self.console.as_mut(), &self.options.bell_style)?;
                false
            }
            CommandOutcome::EndOfFile => return Err(ReadlineError::EndOfFile),
            CommandOutcome::ShowCompletions(candidates) => {
                self.render.show_completions(
                    self.console.as_mut(),
                    &self.options,
                    &self.modes.active().state().buffer,
                    &candidates,
                )?;
                false
            }
            CommandOutcome::ClearScreen => {
                self.render.clear_screen(self.console.as_mut())?;
                false
            }
        };
        self.update_line()?;
        ok!(complete)
    }

    fn update_line(&mut self) -> ReadlineResult<()> {
        self.render
            .update_line(self.console.as_mut(), &self.options, self.modes.active())
    }

    /// Move below the line, record it in history and return it with a newline.
    fn finish_line(&mut self) -> ReadlineResult<String> {
        let text = self.get_line_buffer();
        let window = self.console.size()?;
        let quoted = self.modes.active().state().buffer.quoted_text();
        let end_of_line = self.render.wrap_from_prompt_end(&quoted, window);
        self.console.set_pos(end_of_line)?;
        self.console
            .write_scrolling("\n", self.options.command_style())?;

        self.add_history(&text);
        tracing::debug!(message = "readline -> line complete", line = %text);
        ok!(format!("{text}\n"))
    }
}

#[cfg(test)]
mod tests {
    use crate::{ConsoleMock, ManualClock, ModifierKeysMask, Readline, ReadlineConfig,
                ReadlineError, SpecialKey, TestClipboard, keypress, pos};
    use pretty_assertions::assert_eq;
    use std::{sync::{Arc, Mutex, PoisonError,
                     atomic::{AtomicUsize, Ordering}},
              time::Duration};

    fn readline(console: &ConsoleMock) -> Readline {
        let mut it = Readline::try_new(
            Box::new(console.clone()),
            ReadlineConfig::without_config_file("/nonexistent/history"),
        )
        .unwrap();
        it.set_clipboard(TestClipboard::default());
        it
    }

    fn enter() -> crate::KeyPress { keypress!(@special SpecialKey::Enter) }

    #[test]
    fn test_read_line_returns_line_and_records_history() {
        let console = ConsoleMock::new(20, 5);
        let mut readline = readline(&console);
        console.push_text("hi");
        console.push_key(enter());

        assert_eq!(readline.read_line("> ").unwrap(), "hi\n");
        assert_eq!(readline.history_entries(), ["hi"]);
        assert_eq!(console.row_text(0), "> hi");
        assert_eq!(console.cursor(), pos(0, 1));
    }

    #[test]
    fn test_abort_when_interrupts_disallowed() {
        let console = ConsoleMock::new(20, 5);
        let mut readline = readline(&console);
        console.push_text("hi");
        console.push_abort();
        assert!(matches!(readline.read_line("> "), Err(ReadlineError::Aborted)));
        assert!(readline.history_entries().is_empty());
    }

    #[test]
    fn test_single_tap_cancels_search_not_read() {
        let console = ConsoleMock::new(30, 5);
        let clock = ManualClock::new();
        let mut readline = readline(&console).with_clock(clock.clone());
        readline.set_allow_ctrl_c(true);
        readline.add_history("cargo test");

        let ctrl = ModifierKeysMask::new().with_ctrl();
        console.push_text("x");
        console.push_key(keypress!(@char ctrl, 'r'));
        console.push_text("car");
        console.push_abort();
        console.push_key(enter());

        readline.install_callback("> ", |_| {}).unwrap();
        clock.advance(Duration::from_secs(1));
        for _ in 0..5 {
            readline.read_char_step().unwrap();
        }
        assert_eq!(readline.get_line_buffer(), "cargo test");
        readline.read_char_step().unwrap();
        assert_eq!(readline.get_line_buffer(), "x");
        assert_eq!(readline.active_mode().state().display_prompt(), "> ");
    }

    #[test]
    fn test_end_of_file_on_empty_line() {
        let console = ConsoleMock::new(20, 5);
        let mut readline = readline(&console);
        console.push_key(keypress!(@char ModifierKeysMask::new().with_ctrl(), 'd'));
        assert!(matches!(readline.read_line("> "), Err(ReadlineError::EndOfFile)));
    }

    #[test]
    fn test_unsupported_bell_surfaces() {
        let console = ConsoleMock::new(20, 5);
        let mut readline = readline(&console);
        readline.parse_and_bind("set bell-style visible").unwrap();
        // Nothing to delete at the start of the line.
        console.push_key(keypress!(@special SpecialKey::Backspace));
        assert!(matches!(
            readline.read_line("> "),
            Err(ReadlineError::UnsupportedBellStyle(_))
        ));
    }

    #[test]
    fn test_hooks_fire_once_per_read() {
        let console = ConsoleMock::new(20, 5);
        let mut readline = readline(&console);
        let startup = Arc::new(AtomicUsize::new(0));
        let pre_input = Arc::new(AtomicUsize::new(0));
        let (startup_count, pre_input_count) = (startup.clone(), pre_input.clone());
        readline.set_startup_hook(Some(Box::new(move || {
            startup_count.fetch_add(1, Ordering::SeqCst);
        })));
        readline.set_pre_input_hook(Some(Box::new(move || {
            pre_input_count.fetch_add(1, Ordering::SeqCst);
        })));

        console.push_text("abc");
        console.push_key(enter());
        readline.read_line("> ").unwrap();
        assert_eq!(startup.load(Ordering::SeqCst), 1);
        assert_eq!(pre_input.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_paste_queue_delivers_one_line_per_step() {
        let console = ConsoleMock::new(30, 8);
        let clipboard = TestClipboard::new("first\nsecond\nthird\n");
        let mut readline = readline(&console);
        readline.set_clipboard(clipboard);
        console.push_key(keypress!(@char ModifierKeysMask::new().with_ctrl(), 'v'));

        let lines = Arc::new(Mutex::new(vec![]));
        let sink = lines.clone();
        readline
            .install_callback("> ", move |line| {
                sink.lock().unwrap_or_else(PoisonError::into_inner).push(line);
            })
            .unwrap();

        readline.read_char_step().unwrap();
        assert!(readline.event_available().unwrap());
        readline.read_char_step().unwrap();
        readline.read_char_step().unwrap();
        assert!(!readline.event_available().unwrap());
        assert_eq!(
            *lines.lock().unwrap(),
            vec!["first\n", "second\n", "third\n"]
        );
        assert_eq!(readline.history_entries(), ["first", "second", "third"]);
    }

    #[test]
    fn test_callback_runs_before_next_prompt_is_printed() {
        let console = ConsoleMock::new(20, 5);
        let mut readline = readline(&console);
        let seen = Arc::new(Mutex::new(vec![]));
        let (sink, screen) = (seen.clone(), console.clone());
        readline
            .install_callback("> ", move |line| {
                let snapshot = (line, screen.cursor(), screen.row_text(1));
                sink.lock().unwrap_or_else(PoisonError::into_inner).push(snapshot);
            })
            .unwrap();

        console.push_text("hi");
        console.push_key(enter());
        for _ in 0..3 {
            readline.read_char_step().unwrap();
        }
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("hi\n".to_string(), pos(0, 1), String::new())]
        );
        assert_eq!(console.row_text(1), ">");
    }

    #[test]
    fn test_detached_engine_cannot_read() {
        let mut readline =
            Readline::new_detached(ReadlineConfig::without_config_file("/nonexistent/history"))
                .unwrap();
        assert!(matches!(
            readline.read_line("> "),
            Err(ReadlineError::Unimplemented { operation: "read_line" })
        ));
        assert!(matches!(
            readline.install_callback("> ", |_| {}),
            Err(ReadlineError::Unimplemented { .. })
        ));
    }

    #[test]
    fn test_step_without_callback_is_inert() {
        let console = ConsoleMock::new(20, 5);
        let mut readline = readline(&console);
        console.push_text("a");
        readline.read_char_step().unwrap();
        assert_eq!(console.state().events.len(), 1);
    }
}
