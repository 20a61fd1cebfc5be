// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{default_config_file_path, default_history_file_path};
use std::path::PathBuf;

/// Paths the engine is constructed with. Nothing else in the crate looks up per-user
/// locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadlineConfig {
    /// Run by [`crate::Readline::try_new`] when it exists. `None` skips it.
    pub config_file: Option<PathBuf>,
    /// Default path for every mode's history file.
    pub history_file: PathBuf,
}

impl Default for ReadlineConfig {
    fn default() -> Self {
        Self {
            config_file: Some(default_config_file_path()),
            history_file: default_history_file_path(),
        }
    }
}

impl ReadlineConfig {
    /// No configuration file, history in `history_file`.
    #[must_use]
    pub fn without_config_file(history_file: impl Into<PathBuf>) -> Self {
        Self {
            config_file: None,
            history_file: history_file.into(),
        }
    }

    #[must_use]
    pub fn with_config_file(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = Some(config_file.into());
        self
    }
}
