// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Custom event formatter for tracing
//!
//! Log records end up in a file, a UDP datagram, or on stderr while the terminal is in
//! raw mode, so the format is plain text on a single line:
//!
//! ```text
//! <timestamp> <level_sigil>: <message> <field>=<value> <field>=<value>
//! ```
//!
//! The `message` field (the one that `info!("...")` injects) is always written first,
//! followed by the other fields in the order they were recorded. Empty field values
//! are skipped.
//!
//! To use it, register it with `tracing_subscriber`. This is done in
//! [`crate::create_fmt`!]:
//!
//! ```rust
//! # use tracing_subscriber::fmt::SubscriberBuilder;
//! # use r3bl_readline::CustomEventFormatter;
//! let subscriber = SubscriberBuilder::default()
//!     .event_format(CustomEventFormatter)
//!     .finish();
//! ```

use chrono::Local;
use const_format::formatcp;
use custom_event_formatter_constants::{DEBUG_SIGIL, ERROR_SIGIL, FIELD_SEPARATOR,
                                       INFO_SIGIL, LEVEL_SUFFIX, TIMESTAMP_FORMAT,
                                       TRACE_SIGIL, WARN_SIGIL};
use std::fmt::{self, Write as _};
use tracing::{Event, Subscriber,
              field::{Field, Visit}};
use tracing_subscriber::{fmt::{FormatEvent, FormatFields},
                         registry::LookupSpan};

/// This is the "marker" struct that is used to register this formatter with the
/// `tracing_subscriber` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct CustomEventFormatter;

#[rustfmt::skip]
pub mod custom_event_formatter_constants {
    use super::formatcp;

    pub const LEVEL_SUFFIX: &str = ":";
    pub const FIELD_SEPARATOR: &str = "=";

    pub const ERROR_SIGIL: &str = "E";
    pub const WARN_SIGIL: &str = "W";
    pub const INFO_SIGIL: &str = "I";
    pub const DEBUG_SIGIL: &str = "D";
    pub const TRACE_SIGIL: &str = "T";

    pub const TIMESTAMP_FORMAT: &str = formatcp!("{}:{}:{}", "%H", "%M", "%S%.3f");
}

impl<S, N> FormatEvent<S, N> for CustomEventFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut f: tracing_subscriber::fmt::format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let sigil = match *event.metadata().level() {
            tracing::Level::ERROR => ERROR_SIGIL,
            tracing::Level::WARN => WARN_SIGIL,
            tracing::Level::INFO => INFO_SIGIL,
            tracing::Level::DEBUG => DEBUG_SIGIL,
            tracing::Level::TRACE => TRACE_SIGIL,
        };
        write!(
            f,
            "{ts} {sigil}{LEVEL_SUFFIX}",
            ts = Local::now().format(TIMESTAMP_FORMAT)
        )?;

        if let Some(scope) = ctx.lookup_current() {
            write!(f, " [{}]", scope.name())?;
        }

        let mut visitor = VisitEventAndCollectFields::default();
        event.record(&mut visitor);
        writeln!(f, "{}", visitor.into_line())
    }
}

/// Collects the `message` field and the remaining key value pairs of one event.
#[derive(Debug, Default)]
pub struct VisitEventAndCollectFields {
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl VisitEventAndCollectFields {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else if !value.is_empty() {
            self.fields.push((field.name(), value));
        }
    }

    #[must_use]
    pub fn into_line(self) -> String {
        let mut acc = String::new();
        if !self.message.is_empty() {
            acc.push(' ');
            acc.push_str(&self.message);
        }
        for (name, value) in self.fields {
            // Writing to a String never fails.
            write!(acc, " {name}{FIELD_SEPARATOR}{value}").ok();
        }
        acc
    }
}

impl Visit for VisitEventAndCollectFields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }

    /// Use [`std::fmt::Display`] for strings, so that quotes and newlines are not
    /// escaped.
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }
}

#[cfg(test)]
mod tests_custom_event_formatter {
    use super::*;
    use crate::core::test_fixtures::StdoutMock;
    use std::sync::Mutex;
    use tracing::{info, subscriber::set_default, warn};
    use tracing_subscriber::fmt::SubscriberBuilder;

    #[test]
    fn test_message_comes_first_then_fields() {
        let mock_stdout = StdoutMock::new();
        let mock_stdout_clone = mock_stdout.clone();
        let subscriber = SubscriberBuilder::default()
            .event_format(CustomEventFormatter)
            .with_writer(Mutex::new(mock_stdout))
            .finish();

        // Note that tests, or libraries for that matter, should NOT call
        // `subscriber::set_global_default()`.
        let _drop_guard = set_default(subscriber);

        info!(chord = "Control-a", message = "bound key", command = "beginning_of_line");

        let it = mock_stdout_clone.get_copy_of_buffer_as_string();
        assert!(it.contains(&format!("{INFO_SIGIL}{LEVEL_SUFFIX} bound key")));
        assert!(it.contains("chord=Control-a command=beginning_of_line"));
        assert_eq!(it.matches('\n').count(), 1);
    }

    #[test]
    fn test_level_sigils() {
        let mock_stdout = StdoutMock::new();
        let mock_stdout_clone = mock_stdout.clone();
        let subscriber = SubscriberBuilder::default()
            .event_format(CustomEventFormatter)
            .with_writer(Mutex::new(mock_stdout))
            .finish();
        let _drop_guard = set_default(subscriber);

        warn!("careful");

        let it = mock_stdout_clone.get_copy_of_buffer_as_string();
        assert!(it.contains(&format!("{WARN_SIGIL}{LEVEL_SUFFIX} careful")));
    }
}
