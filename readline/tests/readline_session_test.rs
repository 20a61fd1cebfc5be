// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end sessions through the public API, against [`ConsoleMock`].

use pretty_assertions::assert_eq;
use r3bl_readline::{BindOutcome, Completer, ConsoleMock, KeyPress, ManualClock,
                    ModifierKeysMask, Readline, ReadlineConfig, ReadlineError, SpecialKey,
                    TestClipboard, keypress, pos};
use std::{fs,
          io::Write,
          sync::{Arc, Mutex, PoisonError},
          time::Duration};

fn session(console: &ConsoleMock, config: ReadlineConfig) -> Readline {
    let mut readline = Readline::try_new(Box::new(console.clone()), config).unwrap();
    readline.set_clipboard(TestClipboard::default());
    readline
}

fn enter() -> KeyPress { keypress!(@special SpecialKey::Enter) }

fn no_files() -> ReadlineConfig { ReadlineConfig::without_config_file("/nonexistent/history") }

#[test]
fn test_previous_line_is_recalled_on_the_next_read() {
    let console = ConsoleMock::new(30, 6);
    let mut readline = session(&console, no_files());

    console.push_text("first");
    console.push_key(enter());
    assert_eq!(readline.read_line("> ").unwrap(), "first\n");

    console.push_key(keypress!(@special SpecialKey::Up));
    console.push_key(enter());
    assert_eq!(readline.read_line("> ").unwrap(), "first\n");

    // The repeat is not recorded twice.
    assert_eq!(readline.history_entries(), ["first"]);
    assert_eq!(console.screen_text()[..2], ["> first", "> first"]);
}

#[test]
fn test_long_line_wraps_and_read_ends_below_it() {
    let console = ConsoleMock::new(10, 6);
    let mut readline = session(&console, no_files());
    console.push_text("abcdefghijklmno");
    console.push_key(enter());

    assert_eq!(readline.read_line("> ").unwrap(), "abcdefghijklmno\n");
    assert_eq!(console.row_text(0), "> abcdefgh");
    assert_eq!(console.row_text(1), "ijklmno");
    assert_eq!(console.cursor(), pos(0, 2));
}

#[test]
fn test_vi_mode_switches_between_submodes() {
    let console = ConsoleMock::new(30, 6);
    let mut readline = session(&console, no_files());
    readline.switch_mode("vi").unwrap();

    console.push_text("world");
    console.push_key(keypress!(@special SpecialKey::Esc));
    console.push_text("I");
    console.push_text("hello ");
    console.push_key(enter());

    assert_eq!(readline.read_line("$ ").unwrap(), "hello world\n");
    assert_eq!(readline.modes().active_name(), "vi");
}

#[test]
fn test_tab_completes_word_at_point() {
    let console = ConsoleMock::new(40, 8);
    let mut readline = session(&console, no_files());
    let completer: Completer = Arc::new(|text: &str, state: usize| {
        ["checkout", "cherry-pick", "commit"]
            .iter()
            .filter(|it| it.starts_with(text))
            .nth(state)
            .map(ToString::to_string)
    });
    readline.set_completer(Some(completer));

    console.push_text("git co");
    console.push_key(keypress!(@special SpecialKey::Tab));
    console.push_key(enter());
    assert_eq!(readline.read_line("> ").unwrap(), "git commit\n");
    assert_eq!((readline.get_begidx(), readline.get_endidx()), (4, 6));

    readline.parse_and_bind("set show-all-if-ambiguous on").unwrap();
    console.push_text("git ch");
    console.push_key(keypress!(@special SpecialKey::Tab));
    console.push_key(enter());
    assert_eq!(readline.read_line("> ").unwrap(), "git che\n");
    let screen = console.screen_text().join("\n");
    assert!(screen.contains("checkout"), "{screen}");
    assert!(screen.contains("cherry-pick"), "{screen}");
}

#[test]
fn test_double_tap_aborts_single_tap_does_not() {
    let console = ConsoleMock::new(30, 6);
    let clock = ManualClock::new();
    let mut readline = session(&console, no_files()).with_clock(clock.clone());
    readline.set_allow_ctrl_c(true);
    readline.set_ctrl_c_tap_time_interval(Duration::from_millis(300));

    console.push_text("ab");
    console.push_abort();
    console.push_abort();

    readline.install_callback("> ", |_| {}).unwrap();
    clock.advance(Duration::from_secs(1));
    readline.read_char_step().unwrap();
    readline.read_char_step().unwrap();
    readline.read_char_step().unwrap();
    assert_eq!(readline.get_line_buffer(), "ab");

    clock.advance(Duration::from_millis(100));
    assert!(matches!(readline.read_char_step(), Err(ReadlineError::Aborted)));
}

#[test]
fn test_callback_protocol_reprints_prompt_after_each_line() {
    let console = ConsoleMock::new(30, 8);
    let mut readline = session(&console, no_files());
    let lines = Arc::new(Mutex::new(vec![]));
    let sink = lines.clone();
    readline
        .install_callback("% ", move |line| {
            sink.lock().unwrap_or_else(PoisonError::into_inner).push(line);
        })
        .unwrap();

    console.push_text("ls");
    console.push_key(enter());
    console.push_text("pwd");
    console.push_key(enter());
    while readline.event_available().unwrap() {
        readline.read_char_step().unwrap();
    }
    readline.remove_callback();

    assert_eq!(*lines.lock().unwrap(), vec!["ls\n", "pwd\n"]);
    assert_eq!(console.screen_text()[..3], ["% ls", "% pwd", "%"]);
    assert_eq!(readline.history_entries(), ["ls", "pwd"]);
}

#[test]
fn test_config_file_and_history_file_survive_a_session() {
    let folder = tempfile::tempdir().unwrap();
    let history = folder.path().join("history");
    fs::write(&history, "old one\nold two\n").unwrap();
    let config = folder.path().join("config");
    let mut file = fs::File::create(&config).unwrap();
    writeln!(file, "# session test").unwrap();
    writeln!(file, "set editing-mode vi").unwrap();
    writeln!(file, "history_length(2)").unwrap();
    writeln!(file, "bind_key(\"Control-x\", \"accept_line\")").unwrap();
    drop(file);

    let console = ConsoleMock::new(30, 6);
    let mut readline = session(
        &console,
        ReadlineConfig::without_config_file(&history).with_config_file(&config),
    );
    assert_eq!(readline.modes().active_name(), "vi");
    readline.read_history_file(None).unwrap();

    console.push_text("new");
    console.push_key(keypress!(@char ModifierKeysMask::new().with_ctrl(), 'x'));
    assert_eq!(readline.read_line("> ").unwrap(), "new\n");
    readline.write_history_file(None).unwrap();

    assert_eq!(fs::read_to_string(&history).unwrap(), "old two\nnew\n");
}

#[test]
fn test_parse_and_bind_reports_instead_of_failing() {
    let mut readline = Readline::new_detached(no_files()).unwrap();
    assert!(matches!(
        readline.parse_and_bind("# just a comment"),
        Ok(BindOutcome::Comment)
    ));
    assert!(matches!(
        readline.parse_and_bind("set no-such-option on"),
        Ok(BindOutcome::Ignored(_))
    ));
    assert!(matches!(
        readline.parse_and_bind("Control-a: end-of-line"),
        Ok(BindOutcome::Applied)
    ));
}
