// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Grammar of one `parse_and_bind` statement:
//!
//! ```text
//! statement := '#' any                  comment
//!            | "set" ws name ws value    option
//!            | chord ':' command         key binding, split at the last ':'
//! name      := [-a-zA-Z0-9_]+
//! command   := [-a-zA-Z_]+
//! ```
//!
//! A line that starts with `set` but does not match is a malformed set. Anything else
//! that does not match is unrecognized. Both are warnings, never errors.

use nom::{IResult, Parser,
          bytes::complete::{tag, take_while1},
          character::complete::multispace1,
          combinator::{all_consuming, rest},
          sequence::{preceded, separated_pair}};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Comment,
    Set { name: String, value: String },
    Bind { chord: String, command: String },
    MalformedSet,
    Unrecognized,
}

/// A statement that was skipped. Returned inside [`BindOutcome::Ignored`] and
/// logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatementWarning {
    #[error("unknown option `{name}` (value `{value}`)")]
    UnknownOption { name: String, value: String },

    #[error("invalid value `{value}` for option `{name}`, expected {expected}")]
    InvalidOptionValue {
        name: String,
        value: String,
        expected: &'static str,
    },

    #[error("unknown command `{command}` for key `{chord}`")]
    UnknownCommand { chord: String, command: String },

    #[error("malformed set statement `{statement}`")]
    MalformedSet { statement: String },

    #[error("unrecognized statement `{statement}`")]
    Unrecognized { statement: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindOutcome {
    Applied,
    Comment,
    Ignored(StatementWarning),
}

#[must_use]
pub fn parse_statement(input: &str) -> Statement {
    let line = input.trim();
    if line.is_empty() || line.starts_with('#') {
        return Statement::Comment;
    }

    if line.starts_with("set") {
        return match parse_set(line) {
            Ok((_, (name, value))) if !value.trim().is_empty() => Statement::Set {
                name: name.to_string(),
                value: value.trim().to_string(),
            },
            _ => Statement::MalformedSet,
        };
    }

    let Some((chord, command)) = line.rsplit_once(':') else {
        return Statement::Unrecognized;
    };
    let (chord, command) = (chord.trim(), command.trim());
    if chord.is_empty() || parse_command_name(command).is_err() {
        return Statement::Unrecognized;
    }
    Statement::Bind {
        chord: chord.to_string(),
        command: command.to_string(),
    }
}

#[rustfmt::skip]
fn parse_set(input: &str) -> IResult<&str, (&str, &str)> {
    preceded(
        /* start */ (tag("set"), multispace1),
        /* output */ separated_pair(
            take_while1(|it: char| it.is_ascii_alphanumeric() || it == '-' || it == '_'),
            multispace1,
            rest,
        ),
    ).parse(input)
}

#[rustfmt::skip]
fn parse_command_name(input: &str) -> IResult<&str, &str> {
    all_consuming(
        take_while1(|it: char| it.is_ascii_alphabetic() || it == '-' || it == '_'),
    ).parse(input)
}
