// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The options `set <name> <value>` may change. Names use `_` (a `-` in a statement is
//! replaced before lookup). Each option parses its raw value into a typed
//! [`OptionValue`], so a bad value is reported instead of stored.

use crate::{BellStyle, ConsoleColor, palette_color};
use std::{str::FromStr, time::Duration};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SettableOption {
    BellStyle,
    EditingMode,
    AllowCtrlC,
    CtrlCTapTimeInterval,
    PromptColor,
    #[strum(to_string = "input_color", serialize = "command_color")]
    InputColor,
    CompleterDelims,
    ShowAllIfAmbiguous,
    MarkDirectories,
    CompleteFilesystem,
    HistoryLength,
    HistoryFilename,
    KillRingToClipboard,
    Debug,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Int(i32),
    Interval(Duration),
    Color(ConsoleColor),
    Bell(BellStyle),
    Text(String),
}

impl SettableOption {
    /// Look up a statement's option name, `-` and `_` being equivalent.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> { Self::from_str(&name.replace('-', "_")).ok() }

    /// What a valid value looks like, for warnings.
    #[must_use]
    pub fn expected(self) -> &'static str {
        match self {
            SettableOption::AllowCtrlC
            | SettableOption::ShowAllIfAmbiguous
            | SettableOption::MarkDirectories
            | SettableOption::CompleteFilesystem
            | SettableOption::KillRingToClipboard
            | SettableOption::Debug => "on or off",
            SettableOption::CtrlCTapTimeInterval => "a non negative number of seconds",
            SettableOption::HistoryLength => "an integer (negative for unlimited)",
            SettableOption::PromptColor | SettableOption::InputColor => "a color name",
            SettableOption::BellStyle => "none, audible or visible",
            SettableOption::EditingMode => "an editing mode name",
            SettableOption::CompleterDelims | SettableOption::HistoryFilename => "any text",
        }
    }

    /// `None` when `raw` is not a valid value for this option.
    #[must_use]
    pub fn parse_value(self, raw: &str) -> Option<OptionValue> {
        let trimmed = raw.trim();
        match self {
            SettableOption::AllowCtrlC
            | SettableOption::ShowAllIfAmbiguous
            | SettableOption::MarkDirectories
            | SettableOption::CompleteFilesystem
            | SettableOption::KillRingToClipboard
            | SettableOption::Debug => parse_bool(trimmed).map(OptionValue::Bool),
            SettableOption::CtrlCTapTimeInterval => parse_interval(trimmed).map(OptionValue::Interval),
            SettableOption::HistoryLength => trimmed.parse().ok().map(OptionValue::Int),
            SettableOption::PromptColor | SettableOption::InputColor => {
                Some(OptionValue::Color(palette_color(trimmed)))
            }
            SettableOption::BellStyle => BellStyle::from_str(trimmed).ok().map(OptionValue::Bell),
            SettableOption::EditingMode | SettableOption::HistoryFilename => {
                (!trimmed.is_empty()).then(|| OptionValue::Text(trimmed.to_string()))
            }
            // Delimiters may be blanks, so they are taken as written.
            SettableOption::CompleterDelims => Some(OptionValue::Text(raw.to_string())),
        }
    }
}

/// `on/off`, `true/false`, `yes/no`, `1/0`, case insensitive.
#[must_use]
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Seconds as a non negative decimal number.
#[must_use]
pub fn parse_interval(value: &str) -> Option<Duration> {
    let seconds: f64 = value.trim().parse().ok()?;
    Duration::try_from_secs_f64(seconds).ok()
}
