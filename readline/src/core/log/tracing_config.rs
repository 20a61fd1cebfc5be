// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::DebugSinks;
use tracing_core::LevelFilter;

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both,
/// 4. the runtime switchable [`DebugSinks`] (driven by the `debug_output`
///    configuration function).
///
/// Pass it to [`crate::try_initialize_logging_global`] or
/// [`crate::try_initialize_logging_thread_local`].
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
    pub debug_sinks: Option<DebugSinks>,
}

/// - `String` is the log file path, eg: `/tmp/readline.log` or `readline.log`.
/// - [`DisplayPreference`] is the preferred display to use for logging.
///
/// While the engine owns the terminal (raw mode), prefer a file or
/// [`DisplayPreference::Stderr`] redirected somewhere else, since anything written to
/// stdout is painted over the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    #[must_use]
    pub fn new_file(filename: Option<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(
                filename.unwrap_or_else(|| crate::DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
            debug_sinks: None,
        }
    }

    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level_filter: LevelFilter::DEBUG,
            debug_sinks: None,
        }
    }

    /// Only the switchable sinks, nothing else. They start out switched off.
    #[must_use]
    pub fn new_debug_sinks(debug_sinks: DebugSinks) -> Self {
        Self {
            writer_config: WriterConfig::None,
            level_filter: LevelFilter::DEBUG,
            debug_sinks: Some(debug_sinks),
        }
    }

    #[must_use]
    pub fn with_debug_sinks(mut self, debug_sinks: DebugSinks) -> Self {
        self.debug_sinks = Some(debug_sinks);
        self
    }

    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

impl From<DisplayPreference> for TracingConfig {
    fn from(preferred_display: DisplayPreference) -> Self {
        Self::new_display(preferred_display)
    }
}

impl From<DebugSinks> for TracingConfig {
    fn from(debug_sinks: DebugSinks) -> Self { Self::new_debug_sinks(debug_sinks) }
}
