// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Error taxonomy for the engine.
//!
//! - Problems with a single `parse_and_bind` statement are not errors. They are
//!   [`crate::StatementWarning`]s, logged and returned inside
//!   [`crate::BindOutcome::Ignored`].
//! - Everything in [`ReadlineError`] is fatal to the operation that produced it. In
//!   particular [`ReadlineError::Aborted`] must reach the host unmodified, since it is
//!   how a double tap of Ctrl+C cancels a read.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::{io, path::{Path, PathBuf}};

/// Type alias used by every fallible operation in this crate.
pub type ReadlineResult<T> = Result<T, ReadlineError>;

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ReadlineError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("bell style `{0}` is not supported")]
    #[diagnostic(
        code(r3bl_readline::bell_style),
        help("supported bell styles are `none` and `audible`")
    )]
    UnsupportedBellStyle(String),

    #[error("read aborted by interrupt")]
    #[diagnostic(code(r3bl_readline::aborted))]
    Aborted,

    #[error("end of file")]
    #[diagnostic(code(r3bl_readline::eof))]
    EndOfFile,

    #[error("`{operation}` is not implemented without a console surface")]
    #[diagnostic(code(r3bl_readline::unimplemented))]
    Unimplemented { operation: &'static str },

    #[error("no console surface is attached, can't run `{operation}`")]
    #[diagnostic(
        code(r3bl_readline::console_not_attached),
        help("call `Readline::attach_console` before reading input")
    )]
    ConsoleNotAttached { operation: &'static str },

    #[error("invalid key description `{description}`")]
    #[diagnostic(
        code(r3bl_readline::key_description),
        help("use names like `Control-a`, `Meta-f`, `Shift-Tab`, `Return`, `F5`")
    )]
    InvalidKeyDescription { description: String },

    #[error("unknown editing mode `{0}`")]
    #[diagnostic(code(r3bl_readline::unknown_mode))]
    UnknownMode(String),

    #[error("can't access history file {}", path.display())]
    #[diagnostic(code(r3bl_readline::history_file))]
    HistoryFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(r3bl_readline::io))]
    Io(#[from] io::Error),
}

/// A fatal problem while running a configuration file. The whole file is attached as
/// the source code of the diagnostic, with the offending line labelled, so that
/// [`miette`] can render a report pointing at it.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("error in configuration file {}, line {line}: {reason}", src.name())]
#[diagnostic(code(r3bl_readline::config))]
pub struct ConfigError {
    /// 1-based line number.
    pub line: usize,
    pub reason: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("this line")]
    pub span: SourceSpan,
}

impl ConfigError {
    /// `line` is 1-based. When it is out of range the label covers the whole file.
    #[must_use]
    pub fn new(path: &Path, script: &str, line: usize, reason: impl Into<String>) -> Self {
        let span = line_span(script, line);
        Self {
            line,
            reason: reason.into(),
            src: NamedSource::new(path.display().to_string(), script.to_string()),
            span,
        }
    }

    #[must_use]
    pub fn path(&self) -> &str { self.src.name() }
}

fn line_span(script: &str, line: usize) -> SourceSpan {
    let mut offset = 0;
    for (index, text) in script.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let len = text.trim_end_matches(['\r', '\n']).len();
            return (offset, len).into();
        }
        offset += text.len();
    }
    (0, script.len()).into()
}
