// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Per-user default locations. Nothing in the engine looks these up implicitly; they
//! only feed [`crate::ReadlineConfig::default`].

use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE_NAME: &str = ".r3bl_readline.ini";
pub const DEFAULT_HISTORY_FILE_NAME: &str = ".r3bl_readline_history";

/// `~/.r3bl_readline.ini`, or a relative path when there is no home folder.
#[must_use]
pub fn default_config_file_path() -> PathBuf {
    home_folder_or_current().join(DEFAULT_CONFIG_FILE_NAME)
}

/// `~/.r3bl_readline_history`, or a relative path when there is no home folder.
#[must_use]
pub fn default_history_file_path() -> PathBuf {
    home_folder_or_current().join(DEFAULT_HISTORY_FILE_NAME)
}

/// Replace a leading `~` with the home folder.
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', '\\']) => {
            home_folder_or_current().join(rest.trim_start_matches(['/', '\\']))
        }
        _ => PathBuf::from(path),
    }
}

fn home_folder_or_current() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
