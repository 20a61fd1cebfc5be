// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! History operations on the active mode. None of them touch the buffer, the active
//! mode or the engine options.

use crate::{Readline, ReadlineResult};
use std::path::Path;

impl Readline {
    /// Blank lines and a repeat of the newest entry are skipped.
    pub fn add_history(&mut self, line: &str) {
        self.modes.active_mut().state_mut().history.add_history(line);
    }

    #[must_use]
    pub fn history_entries(&self) -> &[String] { self.modes.active().state().history.entries() }

    /// Negative means unlimited.
    #[must_use]
    pub fn get_history_length(&self) -> i32 {
        self.modes.active().state().history.get_history_length()
    }

    /// Applied when the history is written, not when lines are added.
    pub fn set_history_length(&mut self, length: i32) {
        self.modes
            .active_mut()
            .state_mut()
            .history
            .set_history_length(length);
    }

    pub fn clear_history(&mut self) { self.modes.active_mut().state_mut().history.clear_history(); }

    /// `None` reads the configured history file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReadlineError::HistoryFile`] if the file exists but can't be
    /// read.
    pub fn read_history_file(&mut self, path: Option<&Path>) -> ReadlineResult<()> {
        self.modes
            .active_mut()
            .state_mut()
            .history
            .read_history_file(path)
    }

    /// `None` writes the configured history file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ReadlineError::HistoryFile`] if the file can't be written.
    pub fn write_history_file(&self, path: Option<&Path>) -> ReadlineResult<()> {
        self.modes.active().state().history.write_history_file(path)
    }
}

#[cfg(test)]
mod tests {
    use crate::{ConsoleMock, Readline, ReadlineConfig};
    use pretty_assertions::assert_eq;
    use std::fs;

    fn readline(history_file: &std::path::Path) -> Readline {
        Readline::try_new(
            Box::new(ConsoleMock::new(20, 4)),
            ReadlineConfig::without_config_file(history_file),
        )
        .unwrap()
    }

    #[test]
    fn test_truncated_on_save_only() {
        let folder = tempfile::tempdir().unwrap();
        let path = folder.path().join("history");
        let mut readline = readline(&path);
        for line in ["one", "two", "three", "four"] {
            readline.add_history(line);
        }
        readline.set_history_length(2);
        assert_eq!(readline.history_entries().len(), 4);

        readline.write_history_file(None).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "three\nfour\n");

        readline.set_history_length(-1);
        readline.write_history_file(None).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\nthree\nfour\n");
    }

    #[test]
    fn test_round_trip_leaves_other_state_alone() {
        let folder = tempfile::tempdir().unwrap();
        let path = folder.path().join("history");
        fs::write(&path, "ls\n\ncd /tmp\n").unwrap();

        let mut readline = readline(&path);
        readline.insert_text("draft");
        let options = readline.options().clone();
        readline.read_history_file(None).unwrap();
        assert_eq!(readline.history_entries(), ["ls", "cd /tmp"]);
        assert_eq!(readline.get_line_buffer(), "draft");
        assert_eq!(readline.options(), &options);

        readline.clear_history();
        assert!(readline.history_entries().is_empty());
        assert_eq!(readline.modes().active_name(), "emacs");
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let folder = tempfile::tempdir().unwrap();
        let mut readline = readline(&folder.path().join("nope"));
        readline.read_history_file(None).unwrap();
        assert!(readline.history_entries().is_empty());
    }
}
