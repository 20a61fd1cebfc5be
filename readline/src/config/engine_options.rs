// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ConsoleColor, TextStyle};
use std::{fmt::{self, Display, Formatter},
          time::Duration};
use strum_macros::EnumString;

pub const DEFAULT_TAP_WINDOW: Duration = Duration::from_millis(300);

/// How the bell rings. Any other name parses to [`BellStyle::Other`], which is kept
/// so that the failure surfaces when the bell actually rings.
#[derive(Debug, Clone, PartialEq, Eq, Default, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BellStyle {
    #[default]
    None,
    Audible,
    /// Recognized but not supported by any console surface yet.
    Visible,
    #[strum(default)]
    Other(String),
}

impl BellStyle {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            BellStyle::None => "none",
            BellStyle::Audible => "audible",
            BellStyle::Visible => "visible",
            BellStyle::Other(name) => name,
        }
    }
}

impl Display for BellStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str()) }
}

/// Engine wide settings. Set by configuration, changed later only by explicit
/// setters on [`crate::Readline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    pub bell_style: BellStyle,
    /// When off, the first Ctrl+C aborts the read.
    pub interrupts_allowed: bool,
    /// Two Ctrl+C taps closer than this abort the read.
    pub tap_window: Duration,
    pub prompt_color: Option<ConsoleColor>,
    pub command_color: Option<ConsoleColor>,
    pub selection_style: TextStyle,
    /// Also print unknown `parse_and_bind` commands to stderr.
    pub debug: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            bell_style: BellStyle::default(),
            interrupts_allowed: false,
            tap_window: DEFAULT_TAP_WINDOW,
            prompt_color: None,
            command_color: None,
            selection_style: TextStyle::default_selection(),
            debug: false,
        }
    }
}

impl EngineOptions {
    #[must_use]
    pub fn prompt_style(&self) -> TextStyle { TextStyle::fg(self.prompt_color) }

    #[must_use]
    pub fn command_style(&self) -> TextStyle { TextStyle::fg(self.command_color) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn test_bell_style_parse() {
        assert_eq!(BellStyle::from_str("none").unwrap(), BellStyle::None);
        assert_eq!(BellStyle::from_str("Audible").unwrap(), BellStyle::Audible);
        assert_eq!(BellStyle::from_str("visible").unwrap(), BellStyle::Visible);
        assert_eq!(
            BellStyle::from_str("chime").unwrap(),
            BellStyle::Other("chime".into())
        );
        assert_eq!(BellStyle::Other("chime".into()).to_string(), "chime");
    }

    #[test]
    fn test_defaults() {
        let options = EngineOptions::default();
        assert_eq!(options.bell_style, BellStyle::None);
        assert!(!options.interrupts_allowed);
        assert_eq!(options.tap_window, Duration::from_millis(300));
        assert_eq!(options.command_style(), TextStyle::default());
    }
}
