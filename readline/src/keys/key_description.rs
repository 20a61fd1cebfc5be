// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Parse inputrc style key descriptions into [`KeyPress`] chords.
//!
//! Grammar (modifiers are case-insensitive and may appear in any order):
//!
//! ```text
//! description := '"'? modifier* key_name '"'?
//! modifier    := ( "Control" | "Ctrl" | "C" | "Meta" | "Alt" | "M" | "Shift" | "S" ) '-'
//! key_name    := SpecialKey name | F1..F12 | "Space" | <single character>
//! ```

use crate::{FunctionKey, Key, KeyPress, ModifierKeysMask, ReadlineError, ReadlineResult,
            SpecialKey};
use nom::{IResult, Parser,
          branch::alt,
          bytes::complete::tag_no_case,
          character::complete::char,
          combinator::{all_consuming, map, rest},
          multi::many0,
          sequence::terminated};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    Ctrl,
    Meta,
    Shift,
}

/// Parse a key description like `Control-a`, `Meta-Shift-Left` or `"Return"`.
///
/// # Errors
///
/// Returns [`ReadlineError::InvalidKeyDescription`] when the key name is not known.
pub fn parse_key_description(description: &str) -> ReadlineResult<KeyPress> {
    let trimmed = description.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|it| it.strip_suffix('"'))
        .unwrap_or(trimmed);

    let invalid = || ReadlineError::InvalidKeyDescription {
        description: description.to_string(),
    };

    let (_, (modifiers, key_name)) = parse_chord(unquoted).map_err(|_| invalid())?;
    let key = key_from_name(key_name).ok_or_else(invalid)?;

    let mask = modifiers
        .into_iter()
        .fold(ModifierKeysMask::new(), |mask, modifier| match modifier {
            Modifier::Ctrl => mask.with_ctrl(),
            Modifier::Meta => mask.with_alt(),
            Modifier::Shift => mask.with_shift(),
        });

    Ok(KeyPress::new(key, mask))
}

#[rustfmt::skip]
fn parse_chord(input: &str) -> IResult<&str, (Vec<Modifier>, &str)> {
    all_consuming((many0(parse_modifier), rest)).parse(input)
}

#[rustfmt::skip]
fn parse_modifier(input: &str) -> IResult<&str, Modifier> {
    terminated(
        alt((
            map(
                alt((tag_no_case("control"), tag_no_case("ctrl"), tag_no_case("c"))),
                |_| Modifier::Ctrl,
            ),
            map(
                alt((tag_no_case("meta"), tag_no_case("alt"), tag_no_case("m"))),
                |_| Modifier::Meta,
            ),
            map(
                alt((tag_no_case("shift"), tag_no_case("s"))),
                |_| Modifier::Shift,
            ),
        )),
        char('-'),
    ).parse(input)
}

fn key_from_name(name: &str) -> Option<Key> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (None, _) => None,
        (Some(single), None) => Some(Key::Character(single)),
        _ if name.eq_ignore_ascii_case("space") || name.eq_ignore_ascii_case("spc") => {
            Some(Key::Character(' '))
        }
        _ => SpecialKey::from_str(name)
            .map(Key::SpecialKey)
            .or_else(|_| FunctionKey::from_str(name).map(Key::FunctionKey))
            .ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypress;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("Control-a", keypress!(@char ModifierKeysMask::new().with_ctrl(), 'a'))]
    #[test_case("ctrl-A", keypress!(@char ModifierKeysMask::new().with_ctrl(), 'a'))]
    #[test_case("C-k", keypress!(@char ModifierKeysMask::new().with_ctrl(), 'k'))]
    #[test_case("Meta-f", keypress!(@char ModifierKeysMask::new().with_alt(), 'f'))]
    #[test_case("M-C-x", keypress!(@char ModifierKeysMask::new().with_ctrl().with_alt(), 'x'))]
    #[test_case("Shift-Tab", keypress!(@special SpecialKey::BackTab))]
    #[test_case("Shift-Left", keypress!(@special ModifierKeysMask::new().with_shift(), SpecialKey::Left))]
    #[test_case("Return", keypress!(@special SpecialKey::Enter))]
    #[test_case("\"Escape\"", keypress!(@special SpecialKey::Esc))]
    #[test_case("BackSpace", keypress!(@special SpecialKey::Backspace))]
    #[test_case("f12", keypress!(@fn FunctionKey::F12))]
    #[test_case("Space", keypress!(@char ' '))]
    #[test_case("c", keypress!(@char 'c'))]
    #[test_case("Control--", keypress!(@char ModifierKeysMask::new().with_ctrl(), '-'))]
    fn test_parse_key_description(input: &str, expected: KeyPress) {
        assert_eq!(parse_key_description(input).unwrap(), expected);
    }

    #[test_case("")]
    #[test_case("Control-")]
    #[test_case("Hyper-a")]
    #[test_case("Control-NotAKey")]
    fn test_parse_key_description_invalid(input: &str) {
        let result = parse_key_description(input);
        assert!(matches!(
            result,
            Err(ReadlineError::InvalidKeyDescription { .. })
        ));
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        let chord = keypress!(@special ModifierKeysMask::new().with_ctrl().with_alt(), SpecialKey::Right);
        let description = chord.to_string();
        assert_eq!(description, "Control-Meta-Right");
        assert_eq!(parse_key_description(&description).unwrap(), chord);
    }
}
