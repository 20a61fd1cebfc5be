// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Command history owned by each editing mode. Entries are append only from the
//! engine's point of view. `history_length` is only enforced when the history is
//! written to a file, so a long session never loses lines that it can still recall.
//!
//! The file format is one entry per line, oldest first.

use crate::{LineBuffer, ReadlineError, ReadlineResult, default_history_file_path, ok};
use std::{fs,
          io::{self, Write},
          path::{Path, PathBuf}};

pub const DEFAULT_HISTORY_LENGTH: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Backward,
    Forward,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    /// Negative means unlimited.
    history_length: i32,
    history_filename: PathBuf,
    /// `entries.len()` while editing a fresh line.
    cursor: usize,
    /// The line that was being edited when navigation started.
    saved_line: Option<String>,
}

impl Default for History {
    fn default() -> Self {
        Self {
            entries: vec![],
            history_length: DEFAULT_HISTORY_LENGTH,
            history_filename: default_history_file_path(),
            cursor: 0,
            saved_line: None,
        }
    }
}

impl History {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn entries(&self) -> &[String] { &self.entries }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn get_history_length(&self) -> i32 { self.history_length }

    pub fn set_history_length(&mut self, length: i32) { self.history_length = length; }

    #[must_use]
    pub fn history_filename(&self) -> &Path { &self.history_filename }

    pub fn set_history_filename(&mut self, path: impl Into<PathBuf>) {
        self.history_filename = path.into();
    }

    /// Blank lines and a repeat of the newest entry are not added. Navigation starts
    /// over from the newest entry.
    pub fn add_history(&mut self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        let is_repeat = self.entries.last().is_some_and(|last| last == line);
        if !line.trim().is_empty() && !is_repeat {
            self.entries.push(line.to_string());
        }
        self.reset_navigation();
    }

    pub fn clear_history(&mut self) {
        self.entries.clear();
        self.reset_navigation();
    }

    pub fn reset_navigation(&mut self) {
        self.cursor = self.entries.len();
        self.saved_line = None;
    }

    /// Append one entry per non empty line of the file. `None` reads the configured
    /// history file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::HistoryFile`] if the file exists but can't be read.
    pub fn read_history_file(&mut self, path: Option<&Path>) -> ReadlineResult<()> {
        let path = path.unwrap_or(&self.history_filename).to_path_buf();
        let content = match fs::read_to_string(&path) {
            Ok(it) => it,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(message = "history -> no history file yet", path = %path.display());
                return ok!();
            }
            Err(source) => return Err(ReadlineError::HistoryFile { path, source }),
        };
        let before = self.entries.len();
        for line in content.lines() {
            self.add_history(line);
        }
        tracing::debug!(
            message = "history -> loaded",
            path = %path.display(),
            count = self.entries.len() - before
        );
        ok!()
    }

    /// Write the newest `history_length` entries (all of them when negative), one
    /// per line. `None` writes the configured history file.
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::HistoryFile`] if the file can't be written.
    pub fn write_history_file(&self, path: Option<&Path>) -> ReadlineResult<()> {
        let path = path.unwrap_or(&self.history_filename).to_path_buf();
        let skip = usize::try_from(self.history_length)
            .map_or(0, |keep| self.entries.len().saturating_sub(keep));
        let kept = &self.entries[skip..];

        let write = || -> io::Result<()> {
            let mut file = io::BufWriter::new(fs::File::create(&path)?);
            for entry in kept {
                writeln!(file, "{entry}")?;
            }
            file.flush()
        };
        write().map_err(|source| ReadlineError::HistoryFile {
            path: path.clone(),
            source,
        })?;

        tracing::debug!(message = "history -> saved", path = %path.display(), count = kept.len());
        ok!()
    }

    fn show(&mut self, index: usize, buffer: &mut LineBuffer) {
        if self.saved_line.is_none() {
            self.saved_line = Some(buffer.text().to_string());
        }
        self.cursor = index;
        match self.entries.get(index) {
            Some(entry) => buffer.set_text(entry),
            None => {
                let saved = self.saved_line.take().unwrap_or_default();
                buffer.set_text(&saved);
            }
        }
    }

    /// Returns `false` when already at the oldest entry.
    pub fn previous_history(&mut self, buffer: &mut LineBuffer) -> bool {
        if self.cursor == 0 || self.entries.is_empty() {
            return false;
        }
        let index = self.cursor.min(self.entries.len()) - 1;
        self.show(index, buffer);
        true
    }

    /// Returns `false` when already editing the fresh line.
    pub fn next_history(&mut self, buffer: &mut LineBuffer) -> bool {
        if self.cursor >= self.entries.len() {
            return false;
        }
        self.show(self.cursor + 1, buffer);
        true
    }

    pub fn beginning_of_history(&mut self, buffer: &mut LineBuffer) {
        if !self.entries.is_empty() {
            self.show(0, buffer);
        }
    }

    pub fn end_of_history(&mut self, buffer: &mut LineBuffer) {
        if self.cursor < self.entries.len() {
            self.show(self.entries.len(), buffer);
        }
    }

    /// Index of the nearest entry containing `query`, starting at `start` (inclusive)
    /// and moving in `direction`. `start` is clamped to the entries.
    #[must_use]
    pub fn search(
        &self,
        query: &str,
        start: usize,
        direction: SearchDirection,
    ) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let start = start.min(self.entries.len() - 1);
        let matches = |index: &usize| self.entries[*index].contains(query);
        match direction {
            SearchDirection::Backward => (0..=start).rev().find(matches),
            SearchDirection::Forward => (start..self.entries.len()).find(matches),
        }
    }
}
