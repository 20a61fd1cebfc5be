// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// cspell:words inputrc emacs

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

//! # r3bl_readline
//!
//! An interactive line editor engine. It presents a prompt on a character terminal,
//! turns key presses into edits of an in-memory line buffer under a pluggable key
//! binding scheme (emacs and vi are built in), keeps the terminal in sync with that
//! buffer across line wraps and window scrolls, keeps a command history, and hands the
//! finished line back to the caller.
//!
//! # Table of contents
//!
//! - [Architecture](#architecture)
//! - [Blocking protocol](#blocking-protocol)
//! - [Callback protocol](#callback-protocol)
//! - [Configuration](#configuration)
//! - [Interrupts](#interrupts)
//! - [Logging](#logging)
//!
//! # Architecture
//!
//! ```text
//! ConsoleSurface ──▶ input loop ──▶ EditingMode (mutates LineBuffer)
//!        ▲                                   │
//!        └────────── RenderEngine ◀──────────┘
//! ```
//!
//! - [`ConsoleSurface`] is the terminal driver seam. [`CrosstermConsole`] is the real
//!   one, [`ConsoleMock`] is an in-memory grid used by tests.
//! - [`EditingMode`] is the key binding discipline seam. [`EmacsMode`] and [`ViMode`]
//!   each own a [`ModeState`]: line buffer, history, kill ring, dispatch tables.
//! - [`ModeRegistry`] holds the modes in order and proxies prompt, completer, hooks,
//!   and history operations to the active one.
//! - [`RenderEngine`] repaints the prompt and buffer after every key press.
//! - [`Readline`] ties it together and exposes both read protocols.
//!
//! # Blocking protocol
//!
//! ```no_run
//! use r3bl_readline::{CrosstermConsole, Readline, ReadlineConfig};
//!
//! # fn main() -> miette::Result<()> {
//! let console = CrosstermConsole::try_new()?;
//! let mut readline = Readline::try_new(Box::new(console), ReadlineConfig::default())?;
//! let line = readline.read_line("> ")?;
//! assert!(line.ends_with('\n'));
//! # Ok(())
//! # }
//! ```
//!
//! # Callback protocol
//!
//! The host calls [`Readline::install_callback`] once, then calls
//! [`Readline::read_char_step`] whenever [`Readline::event_available`] says there is
//! input. Each completed line is appended to history and handed to the callback. The
//! two protocols share state and must not be mixed: calling [`Readline::read_line`]
//! while a callback is installed is a precondition violation.
//!
//! # Configuration
//!
//! [`Readline::parse_and_bind`] accepts inputrc style statements:
//!
//! ```text
//! # comment
//! set bell-style audible
//! Control-a: beginning-of-line
//! ```
//!
//! [`Readline::load_config`] runs a configuration file made of those statements plus
//! declarative calls such as `bind_key("Control-k", "kill_line")` or
//! `history_length(500)`. See [`ConfigFunction`] for the full table.
//!
//! # Interrupts
//!
//! When `allow_ctrl_c` is off, Ctrl+C aborts the read with [`ReadlineError::Aborted`].
//! When it is on, a single tap is delivered to the mode as a `Control-c` key press
//! (cancelling an incremental search for example), and two taps closer together than
//! the tap window abort the read.
//!
//! # Logging
//!
//! Logging uses [`tracing`]. See [`try_initialize_logging_global`] and [`DebugSinks`],
//! which the `debug_output` configuration function switches on and off at runtime.

// Enable clippy lint for unwrap_in_result (production code only).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod config;
pub mod console;
pub mod core;
pub mod engine;
pub mod keys;
pub mod line_buffer;
pub mod modes;

// Re-export.
#[allow(ambiguous_glob_reexports)]
pub use config::*;
#[allow(ambiguous_glob_reexports)]
pub use console::*;
#[allow(ambiguous_glob_reexports)]
pub use core::*;
#[allow(ambiguous_glob_reexports)]
pub use engine::*;
#[allow(ambiguous_glob_reexports)]
pub use keys::*;
#[allow(ambiguous_glob_reexports)]
pub use line_buffer::*;
#[allow(ambiguous_glob_reexports)]
pub use modes::*;
