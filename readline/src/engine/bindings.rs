// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `parse_and_bind` statements and the configuration file.
//!
//! A configuration file is read line by line. Each line is either blank, a
//! declarative call from the [`ConfigFunction`] table, or a `parse_and_bind`
//! statement. There is no expression evaluation: call arguments are literals or one of
//! the read only names `version`, `branch`, `mode` and `modes.<name>`.

use crate::{BellStyle, BindOutcome, ConfigError, ConfigFunction, DebugOutput, OptionValue,
            Readline, ReadlineError, ReadlineResult, ScriptCall, ScriptLine, ScriptValue,
            SettableOption, Statement, StatementWarning, expand_home, ok, palette_color,
            parse_key_description, parse_script_line, parse_statement, warn_ignored};
use std::{fs, io,
          path::{Path, PathBuf},
          str::FromStr,
          time::Duration};

impl Readline {
    /// Apply one inputrc style statement to the engine.
    ///
    /// - `# ...` is a comment.
    /// - `set <name> <value>` sets a [`SettableOption`].
    /// - `<chord>: <command>` binds a command of the active mode.
    ///
    /// Unknown options and commands, bad values, and unrecognized lines are logged and
    /// returned as [`BindOutcome::Ignored`].
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::InvalidKeyDescription`] if the chord of a binding
    /// can't be parsed.
    pub fn parse_and_bind(&mut self, statement: &str) -> ReadlineResult<BindOutcome> {
        match parse_statement(statement) {
            Statement::Comment => ok!(BindOutcome::Comment),
            Statement::Set { name, value } => {
                let Some(option) = SettableOption::lookup(&name) else {
                    return ok!(warn_ignored!(StatementWarning::UnknownOption { name, value }));
                };
                let Some(parsed) = option.parse_value(&value) else {
                    return ok!(warn_ignored!(StatementWarning::InvalidOptionValue {
                        name,
                        value,
                        expected: option.expected(),
                    }));
                };
                ok!(self.apply_option(option, parsed))
            }
            Statement::Bind { chord, command } => {
                let key = parse_key_description(&chord).inspect_err(|err| {
                    tracing::error!(message = "readline -> parse_and_bind failed", %statement, %err);
                })?;
                let name = command.replace('-', "_");
                match self.modes.active().command(&name) {
                    Some(found) => {
                        self.modes.active_mut().bind_key(key, found);
                        tracing::debug!(message = "readline -> key bound", %key, command = %name);
                        ok!(BindOutcome::Applied)
                    }
                    None => {
                        if self.options.debug {
                            eprintln!("readline: unknown command `{command}` for key `{chord}`");
                        }
                        ok!(warn_ignored!(StatementWarning::UnknownCommand { chord, command }))
                    }
                }
            }
            Statement::MalformedSet => ok!(warn_ignored!(StatementWarning::MalformedSet {
                statement: statement.trim().to_string(),
            })),
            Statement::Unrecognized => ok!(warn_ignored!(StatementWarning::Unrecognized {
                statement: statement.trim().to_string(),
            })),
        }
    }

    /// Set one option to an already parsed value.
    pub fn apply_option(&mut self, option: SettableOption, value: OptionValue) -> BindOutcome {
        match (option, value) {
            (SettableOption::BellStyle, OptionValue::Bell(style)) => {
                self.options.bell_style = style;
            }
            (SettableOption::EditingMode, OptionValue::Text(name)) => {
                let name = name.to_ascii_lowercase();
                if self.modes.switch_mode(&name).is_err() {
                    return warn_ignored!(StatementWarning::InvalidOptionValue {
                        name: option.to_string(),
                        value: name,
                        expected: option.expected(),
                    });
                }
            }
            (SettableOption::AllowCtrlC, OptionValue::Bool(on)) => {
                self.options.interrupts_allowed = on;
            }
            (SettableOption::CtrlCTapTimeInterval, OptionValue::Interval(window)) => {
                self.options.tap_window = window;
            }
            (SettableOption::PromptColor, OptionValue::Color(color)) => {
                self.options.prompt_color = Some(color);
            }
            (SettableOption::InputColor, OptionValue::Color(color)) => {
                self.options.command_color = Some(color);
            }
            (SettableOption::CompleterDelims, OptionValue::Text(delims)) => {
                self.modes.set_completer_delims(&delims);
            }
            (SettableOption::ShowAllIfAmbiguous, OptionValue::Bool(on)) => {
                self.modes.active_mut().state_mut().show_all_if_ambiguous = on;
            }
            (SettableOption::MarkDirectories, OptionValue::Bool(on)) => {
                self.modes.active_mut().state_mut().mark_directories = on;
            }
            (SettableOption::CompleteFilesystem, OptionValue::Bool(on)) => {
                self.modes.active_mut().state_mut().complete_filesystem = on;
            }
            (SettableOption::HistoryLength, OptionValue::Int(length)) => {
                self.set_history_length(length);
            }
            (SettableOption::HistoryFilename, OptionValue::Text(path)) => {
                self.modes
                    .active_mut()
                    .state_mut()
                    .history
                    .set_history_filename(expand_home(&path));
            }
            (SettableOption::KillRingToClipboard, OptionValue::Bool(on)) => {
                self.set_kill_ring_to_clipboard(on);
            }
            (SettableOption::Debug, OptionValue::Bool(on)) => self.options.debug = on,
            (option, value) => {
                return warn_ignored!(StatementWarning::InvalidOptionValue {
                    name: option.to_string(),
                    value: format!("{value:?}"),
                    expected: option.expected(),
                });
            }
        }
        tracing::debug!(message = "readline -> option set", %option);
        BindOutcome::Applied
    }

    /// Run a configuration file. `None` runs the file the engine was configured
    /// with. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::Config`], pointing at the offending line, for an
    /// unknown function, a wrong argument count or type, an unknown mode, or an invalid
    /// chord.
    pub fn load_config(&mut self, path: Option<&Path>) -> ReadlineResult<()> {
        let Some(path) = path
            .map(Path::to_path_buf)
            .or_else(|| self.config.config_file.clone())
        else {
            return ok!();
        };

        let script = match fs::read_to_string(&path) {
            Ok(it) => it,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(message = "readline -> no config file", path = %path.display());
                return ok!();
            }
            Err(err) => return Err(ConfigError::new(&path, "", 0, err.to_string()).into()),
        };
        tracing::debug!(message = "readline -> load config", path = %path.display());

        for (index, line) in script.lines().enumerate() {
            let fail = |reason: String| {
                let error = ConfigError::new(&path, &script, index + 1, reason);
                tracing::error!(message = "readline -> config failed", %error);
                ReadlineError::from(error)
            };
            match parse_script_line(line).map_err(fail)? {
                ScriptLine::Blank => {}
                ScriptLine::Statement(statement) => {
                    self.parse_and_bind(&statement)
                        .map_err(|err| fail(err.to_string()))?;
                }
                ScriptLine::Call(call) => self.apply_call(call).map_err(fail)?,
            }
        }
        ok!()
    }

    fn apply_call(&mut self, call: ScriptCall) -> Result<(), String> {
        let active = self.modes.active_name();
        let args = call
            .args
            .into_iter()
            .map(|arg| arg.resolve(active, |name| self.modes.contains(name)))
            .collect::<Result<Vec<ScriptValue>, String>>()?;
        let arg = |index: usize| {
            args.get(index)
                .ok_or_else(|| format!("`{}` is missing argument {}", call.function, index + 1))
        };

        match call.function {
            ConfigFunction::SetMode => {
                self.modes
                    .switch_mode(arg(0)?.as_str()?)
                    .map_err(|err| err.to_string())?;
            }
            ConfigFunction::BindKey => {
                let (chord, command) = (arg(0)?.as_str()?, arg(1)?.as_str()?);
                let key = parse_key_description(chord).map_err(|err| err.to_string())?;
                match self.modes.active().command(&command.replace('-', "_")) {
                    Some(found) => self.modes.active_mut().bind_key(key, found),
                    None => {
                        warn_ignored!(StatementWarning::UnknownCommand {
                            chord: chord.to_string(),
                            command: command.to_string(),
                        });
                    }
                }
            }
            ConfigFunction::UnBindKey => {
                let key = parse_key_description(arg(0)?.as_str()?).map_err(|err| err.to_string())?;
                if !self.modes.active_mut().unbind_key(key) {
                    tracing::debug!(message = "readline -> key was not bound", %key);
                }
            }
            ConfigFunction::BindExitKey => {
                let key = parse_key_description(arg(0)?.as_str()?).map_err(|err| err.to_string())?;
                self.modes.active_mut().bind_exit_key(key);
            }
            ConfigFunction::UnBindExitKey => {
                let key = parse_key_description(arg(0)?.as_str()?).map_err(|err| err.to_string())?;
                if !self.modes.active_mut().unbind_exit_key(key) {
                    tracing::debug!(message = "readline -> exit key was not bound", %key);
                }
            }
            ConfigFunction::BellStyle => {
                let name = arg(0)?.as_str()?;
                self.options.bell_style =
                    BellStyle::from_str(name).unwrap_or_else(|_| BellStyle::Other(name.to_string()));
            }
            ConfigFunction::MarkDirectories => {
                self.modes.active_mut().state_mut().mark_directories = arg(0)?.as_bool()?;
            }
            ConfigFunction::ShowAllIfAmbiguous => {
                self.modes.active_mut().state_mut().show_all_if_ambiguous = arg(0)?.as_bool()?;
            }
            ConfigFunction::CompleteFilesystem => {
                self.modes.active_mut().state_mut().complete_filesystem = arg(0)?.as_bool()?;
            }
            ConfigFunction::CompleterDelims => {
                self.modes.set_completer_delims(arg(0)?.as_str()?);
            }
            ConfigFunction::DebugOutput => {
                let name = arg(0)?.as_str()?;
                let output = DebugOutput::from_str(name).map_err(|_| {
                    format!("unknown debug output `{name}`, expected on, on_nologfile or off")
                })?;
                let log_file = match args.get(1) {
                    Some(value) => Some(PathBuf::from(value.as_str()?)),
                    None => None,
                };
                self.debug_sinks
                    .set_output(output, log_file.as_deref())
                    .map_err(|err| err.to_string())?;
                self.options.debug = output != DebugOutput::Off;
            }
            ConfigFunction::HistoryFilename => {
                let path = expand_home(arg(0)?.as_str()?);
                self.modes
                    .active_mut()
                    .state_mut()
                    .history
                    .set_history_filename(path);
            }
            ConfigFunction::HistoryLength => self.set_history_length(arg(0)?.as_int()?),
            ConfigFunction::SetPromptColor => {
                self.options.prompt_color = Some(palette_color(arg(0)?.as_str()?));
            }
            ConfigFunction::SetInputColor => {
                self.options.command_color = Some(palette_color(arg(0)?.as_str()?));
            }
            ConfigFunction::AllowCtrlC => self.options.interrupts_allowed = arg(0)?.as_bool()?,
            ConfigFunction::CtrlCTapTimeInterval => {
                let seconds = arg(0)?.as_f64()?;
                self.options.tap_window = Duration::try_from_secs_f64(seconds)
                    .map_err(|_| format!("invalid tap interval {seconds}"))?;
            }
            ConfigFunction::KillRingToClipboard => {
                self.set_kill_ring_to_clipboard(arg(0)?.as_bool()?);
            }
        }
        tracing::debug!(message = "readline -> config call applied", function = %call.function);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConsoleColor, ConsoleMock, KeyPress, ModifierKeysMask, ReadlineConfig,
                TestClipboard, keypress};
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use test_case::test_case;

    fn readline() -> Readline {
        let mut it = Readline::try_new(
            Box::new(ConsoleMock::new(40, 10)),
            ReadlineConfig::without_config_file("/nonexistent/history"),
        )
        .unwrap();
        it.set_clipboard(TestClipboard::default());
        it
    }

    fn ctrl(ch: char) -> KeyPress { keypress!(@char ModifierKeysMask::new().with_ctrl(), ch) }

    fn bound(readline: &Readline, key: KeyPress) -> Option<String> {
        readline
            .active_mode()
            .state()
            .key_dispatch
            .get(&key)
            .map(|it| it.name.clone())
    }

    fn config_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{line}").unwrap();
        }
        file
    }

    #[test]
    fn test_set_statements() {
        let mut readline = readline();
        readline.set_bell_style(BellStyle::Audible);
        assert_eq!(
            readline.parse_and_bind("set bell-style none").unwrap(),
            BindOutcome::Applied
        );
        assert_eq!(readline.options().bell_style, BellStyle::None);

        readline.parse_and_bind("set allow_ctrl_c on").unwrap();
        readline.parse_and_bind("set ctrl-c-tap-time-interval 0.5").unwrap();
        readline.parse_and_bind("set input-color Red").unwrap();
        readline.parse_and_bind("set editing-mode vi").unwrap();
        assert!(readline.options().interrupts_allowed);
        assert_eq!(readline.options().tap_window, Duration::from_millis(500));
        assert_eq!(readline.options().command_color, Some(ConsoleColor::new(12)));
        assert_eq!(readline.modes().active_name(), "vi");
    }

    #[test_case("set no_such_option 1", "unknown option `no_such_option` (value `1`)")]
    #[test_case("set allow_ctrl_c maybe", "invalid value `maybe` for option `allow_ctrl_c`, expected on or off")]
    #[test_case("set editing-mode ed", "invalid value `ed` for option `editing_mode`, expected an editing mode name")]
    #[test_case("set bell-style", "malformed set statement `set bell-style`")]
    #[test_case("Control-a: fly-away", "unknown command `fly-away` for key `Control-a`")]
    #[test_case("what is this", "unrecognized statement `what is this`")]
    fn test_ignored_statements(statement: &str, warning: &str) {
        let mut readline = readline();
        let before = readline.options().clone();
        match readline.parse_and_bind(statement).unwrap() {
            BindOutcome::Ignored(it) => assert_eq!(it.to_string(), warning),
            other => panic!("expected a warning, got {other:?}"),
        }
        assert_eq!(readline.options(), &before);
        assert_eq!(readline.modes().active_name(), "emacs");
    }

    #[test]
    fn test_bind_statement() {
        let mut readline = readline();
        assert_eq!(
            readline.parse_and_bind("# comment").unwrap(),
            BindOutcome::Comment
        );
        assert_eq!(
            readline
                .parse_and_bind("Control-x: beginning-of-line")
                .unwrap(),
            BindOutcome::Applied
        );
        assert_eq!(bound(&readline, ctrl('x')).as_deref(), Some("beginning_of_line"));

        assert!(matches!(
            readline.parse_and_bind("Hyper-q: beginning-of-line"),
            Err(ReadlineError::InvalidKeyDescription { .. })
        ));
    }

    #[test]
    fn test_config_script_calls() {
        let file = config_file(&[
            "# startup",
            "set_mode(modes.vi)",
            "bind_key(\"Control-k\", \"kill_line\")",
            "bind_exit_key(\"Control-q\")",
            "history_length(3)",
            "completer_delims(\" ;\")",
            "set_prompt_color(\"green\")",
            "allow_ctrl_c(True)",
            "ctrl_c_tap_time_interval(0.25)",
            "kill_ring_to_clipboard(\"on\")",
            "bell_style(\"audible\")",
            "set mark-directories off",
        ]);
        let mut readline = readline();
        readline.load_config(Some(file.path())).unwrap();

        assert_eq!(readline.modes().active_name(), "vi");
        assert_eq!(bound(&readline, ctrl('k')).as_deref(), Some("kill_line"));
        let state = readline.active_mode().state();
        assert!(state.exit_dispatch.contains(&ctrl('q')));
        assert_eq!(state.history.get_history_length(), 3);
        assert_eq!(state.completer_delims, " ;");
        assert!(!state.mark_directories);
        assert!(state.kill_ring.to_clipboard);
        assert_eq!(readline.options().prompt_color, Some(ConsoleColor::new(10)));
        assert!(readline.options().interrupts_allowed);
        assert_eq!(readline.options().tap_window, Duration::from_millis(250));
        assert_eq!(readline.options().bell_style, BellStyle::Audible);
    }

    #[test]
    fn test_config_unknown_command_in_bind_key_is_not_fatal() {
        let file = config_file(&["bind_key(\"Control-k\", \"fly_away\")", "history_length(7)"]);
        let mut readline = readline();
        readline.load_config(Some(file.path())).unwrap();
        assert_eq!(readline.get_history_length(), 7);
    }

    #[test_case(&["history_length(1)", "no_such_function(1)"], 2, "unknown function `no_such_function`")]
    #[test_case(&["history_length(1, 2)"], 1, "`history_length` takes 1 argument(s), got 2")]
    #[test_case(&["history_length(\"ten\")"], 1, "expected an integer")]
    #[test_case(&["", "set_mode(modes.ed)"], 2, "unknown mode `ed`")]
    #[test_case(&["bind_key(\"Hyper-q\", \"kill_line\")"], 1, "invalid key description")]
    #[test_case(&["Hyper-q: kill_line"], 1, "invalid key description")]
    #[test_case(&["debug_output(\"loud\")"], 1, "unknown debug output `loud`")]
    fn test_config_errors(lines: &[&str], line: usize, reason: &str) {
        let file = config_file(lines);
        let mut readline = readline();
        match readline.load_config(Some(file.path())) {
            Err(ReadlineError::Config(error)) => {
                assert_eq!(error.line, line);
                assert!(error.reason.contains(reason), "{}", error.reason);
                assert_eq!(error.path(), file.path().display().to_string());
            }
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_only_names() {
        let file = config_file(&["history_filename(\"/tmp/h_\")", "completer_delims(mode)"]);
        let mut readline = readline();
        readline.load_config(Some(file.path())).unwrap();
        assert_eq!(readline.get_completer_delims(), "emacs");
        assert_eq!(
            readline.active_mode().state().history.history_filename(),
            Path::new("/tmp/h_")
        );
    }

    #[test]
    fn test_missing_config_file() {
        let mut readline = readline();
        assert!(readline.load_config(Some(Path::new("/nonexistent/rc.ini"))).is_ok());
        assert!(readline.load_config(None).is_ok());
    }
}
