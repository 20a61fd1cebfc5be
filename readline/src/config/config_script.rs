// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The configuration file language. It is declarative: each line is blank, a `#`
//! comment, a call to one of the [`ConfigFunction`]s, or a `parse_and_bind` statement.
//! There are no expressions or variables, only literal arguments and a few read only
//! names.
//!
//! ```text
//! # ~/.r3bl_readline.ini
//! set_mode("emacs")
//! bind_key("Control-k", "kill_whole_line")
//! history_length(500)
//! ctrl_c_tap_time_interval(0.5)
//! allow_ctrl_c(True)
//! set_prompt_color("green")
//! set bell-style audible
//! Control-a: beginning-of-line
//! ```
//!
//! Read only names usable as arguments: `version`, `branch`, `mode` (the active mode
//! name) and `modes.<name>` (a registered mode's name).

use crate::parse_bool;
use nom::{IResult, Parser,
          branch::alt,
          bytes::complete::{is_not, take_while},
          character::complete::{anychar, char, digit1, satisfy, space0},
          combinator::{all_consuming, map, map_res, opt, recognize, rest},
          multi::{fold_many0, separated_list0},
          sequence::{delimited, pair, preceded}};
use std::{ops::RangeInclusive, str::FromStr};
use strum_macros::{Display, EnumIter, EnumString};

/// Value of `branch` in configuration files.
pub const RELEASE_BRANCH: &str = "main";

/// Value of `version` in configuration files.
pub const RELEASE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ConfigFunction {
    SetMode,
    BindKey,
    UnBindKey,
    BindExitKey,
    UnBindExitKey,
    BellStyle,
    MarkDirectories,
    ShowAllIfAmbiguous,
    CompleteFilesystem,
    CompleterDelims,
    /// `debug_output("on" | "on_nologfile" | "off", log_file?)`.
    DebugOutput,
    HistoryFilename,
    HistoryLength,
    SetPromptColor,
    SetInputColor,
    AllowCtrlC,
    CtrlCTapTimeInterval,
    KillRingToClipboard,
}

impl ConfigFunction {
    #[must_use]
    pub fn arity(self) -> RangeInclusive<usize> {
        match self {
            ConfigFunction::BindKey => 2..=2,
            ConfigFunction::DebugOutput => 1..=2,
            _ => 1..=1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A read only name, resolved by [`ScriptValue::resolve`].
    Name(String),
}

impl ScriptValue {
    /// Replace a read only name with its value. `mode_exists` checks `modes.<name>`.
    ///
    /// # Errors
    ///
    /// Returns a reason when the name is unknown.
    pub fn resolve(
        self,
        active_mode: &str,
        mode_exists: impl Fn(&str) -> bool,
    ) -> Result<ScriptValue, String> {
        let ScriptValue::Name(name) = self else {
            return Ok(self);
        };
        match name.as_str() {
            "version" => Ok(ScriptValue::Str(RELEASE_VERSION.to_string())),
            "branch" => Ok(ScriptValue::Str(RELEASE_BRANCH.to_string())),
            "mode" => Ok(ScriptValue::Str(active_mode.to_string())),
            _ => match name.strip_prefix("modes.") {
                Some(mode) if mode_exists(mode) => Ok(ScriptValue::Str(mode.to_string())),
                Some(mode) => Err(format!("unknown mode `{mode}`")),
                None => Err(format!("unknown name `{name}`")),
            },
        }
    }

    /// # Errors
    ///
    /// Returns a reason when the value is not a string.
    pub fn as_str(&self) -> Result<&str, String> {
        match self {
            ScriptValue::Str(it) => Ok(it),
            other => Err(format!("expected a string, got {other}")),
        }
    }

    /// Booleans, `0` / `1`, and the strings [`parse_bool`] accepts.
    ///
    /// # Errors
    ///
    /// Returns a reason when the value is not a boolean.
    pub fn as_bool(&self) -> Result<bool, String> {
        match self {
            ScriptValue::Bool(it) => Ok(*it),
            ScriptValue::Int(0) => Ok(false),
            ScriptValue::Int(1) => Ok(true),
            ScriptValue::Str(it) => {
                parse_bool(it).ok_or_else(|| format!("expected a boolean, got {self}"))
            }
            other => Err(format!("expected a boolean, got {other}")),
        }
    }

    /// # Errors
    ///
    /// Returns a reason when the value is not an integer in `i32` range.
    pub fn as_int(&self) -> Result<i32, String> {
        match self {
            ScriptValue::Int(it) => {
                i32::try_from(*it).map_err(|_| format!("integer {it} is out of range"))
            }
            other => Err(format!("expected an integer, got {other}")),
        }
    }

    /// # Errors
    ///
    /// Returns a reason when the value is not a number.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Result<f64, String> {
        match self {
            ScriptValue::Int(it) => Ok(*it as f64),
            ScriptValue::Float(it) => Ok(*it),
            other => Err(format!("expected a number, got {other}")),
        }
    }
}

impl std::fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptValue::Str(it) => write!(f, "{it:?}"),
            ScriptValue::Int(it) => write!(f, "{it}"),
            ScriptValue::Float(it) => write!(f, "{it}"),
            ScriptValue::Bool(it) => write!(f, "{it}"),
            ScriptValue::Name(it) => write!(f, "{it}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptCall {
    pub function: ConfigFunction,
    pub args: Vec<ScriptValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptLine {
    Blank,
    Call(ScriptCall),
    /// Handed to `parse_and_bind` as is.
    Statement(String),
}

/// Classify and parse one line of a configuration file.
///
/// # Errors
///
/// Returns a reason when the line looks like a call (`name(`) but is not a valid one:
/// bad syntax, unknown function, or wrong number of arguments.
pub fn parse_script_line(line: &str) -> Result<ScriptLine, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(ScriptLine::Blank);
    }
    if looks_like_call(trimmed).is_err() {
        return Ok(ScriptLine::Statement(trimmed.to_string()));
    }

    let (_, (name, args)) =
        parse_call(trimmed).map_err(|_| format!("syntax error in call `{trimmed}`"))?;
    let function =
        ConfigFunction::from_str(name).map_err(|_| format!("unknown function `{name}`"))?;
    if !function.arity().contains(&args.len()) {
        let arity = function.arity();
        let expected = if arity.start() == arity.end() {
            arity.start().to_string()
        } else {
            format!("{} to {}", arity.start(), arity.end())
        };
        return Err(format!(
            "`{function}` takes {expected} argument(s), got {}",
            args.len()
        ));
    }
    Ok(ScriptLine::Call(ScriptCall { function, args }))
}

#[rustfmt::skip]
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize(
        pair(
            satisfy(|it| it.is_ascii_alphabetic() || it == '_'),
            take_while(|it: char| it.is_ascii_alphanumeric() || it == '_' || it == '.'),
        ),
    ).parse(input)
}

fn looks_like_call(input: &str) -> IResult<&str, char> {
    preceded((parse_identifier, space0), char('(')).parse(input)
}

#[rustfmt::skip]
fn parse_call(input: &str) -> IResult<&str, (&str, Vec<ScriptValue>)> {
    map(
        all_consuming((
            parse_identifier,
            preceded(
                space0,
                delimited(
                    char('('),
                    separated_list0(char(','), delimited(space0, parse_value, space0)),
                    char(')'),
                ),
            ),
            /* trailing comment */ space0,
            opt(preceded(char('#'), rest)),
        )),
        |(name, args, _, _)| (name, args),
    ).parse(input)
}

fn parse_value(input: &str) -> IResult<&str, ScriptValue> {
    alt((
        map(parse_string_literal, ScriptValue::Str),
        parse_number,
        map(parse_identifier, |name| match name {
            "True" | "true" => ScriptValue::Bool(true),
            "False" | "false" => ScriptValue::Bool(false),
            _ => ScriptValue::Name(name.to_string()),
        }),
    ))
    .parse(input)
}

#[rustfmt::skip]
fn parse_number(input: &str) -> IResult<&str, ScriptValue> {
    alt((
        map_res(
            recognize((opt(char('-')), digit1, char('.'), digit1)),
            |it: &str| it.parse().map(ScriptValue::Float),
        ),
        map_res(
            recognize((opt(char('-')), digit1)),
            |it: &str| it.parse().map(ScriptValue::Int),
        ),
    )).parse(input)
}

fn parse_string_literal(input: &str) -> IResult<&str, String> {
    alt((parse_double_quoted, parse_single_quoted)).parse(input)
}

fn parse_double_quoted(input: &str) -> IResult<&str, String> { parse_quoted(input, '"') }

fn parse_single_quoted(input: &str) -> IResult<&str, String> { parse_quoted(input, '\'') }

/// A literal between `quote`s with backslash escapes.
#[rustfmt::skip]
fn parse_quoted(input: &str, quote: char) -> IResult<&str, String> {
    let stop = if quote == '"' { "\\\"" } else { "\\'" };
    delimited(
        char(quote),
        fold_many0(
            alt((
                map(is_not(stop), ToString::to_string),
                map(preceded(char('\\'), anychar), |it| unescape(it).to_string()),
            )),
            String::new,
            |mut acc, it| {
                acc.push_str(&it);
                acc
            },
        ),
        char(quote),
    ).parse(input)
}

fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}
