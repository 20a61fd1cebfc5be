// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Runtime switchable debug log destinations, driven by the `debug_output`
//! configuration function (and `set debug on`).
//!
//! [`DebugSinks`] is a [`MakeWriter`], so the host installs it once as a tracing layer
//! (see [`crate::TracingConfig::debug_sinks`]) and the configuration file turns it on
//! and off later. Each record is written to:
//! - the log file (only in [`DebugOutput::On`]), and
//! - one UDP datagram sent to [`DEFAULT_SOCKET_TARGET`], so that a log viewer can
//!   follow the engine while it owns the terminal.

use crate::rolling_file_appender_impl;
use std::{io::{self, Write},
          net::{SocketAddr, UdpSocket},
          path::{Path, PathBuf},
          sync::{Arc, Mutex, PoisonError}};
use strum_macros::{Display, EnumString};
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::MakeWriter;

pub const DEFAULT_LOG_FILE_NAME: &str = "readline_debug_log.txt";
pub const DEFAULT_SOCKET_TARGET: &str = "127.0.0.1:8081";
pub const STARTING_LOG_MARKER: &str = "STARTING LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DebugOutput {
    /// Log file plus network sink.
    On,
    /// Network sink only.
    #[strum(to_string = "on_nologfile")]
    OnNoLogFile,
    #[default]
    Off,
}

/// You can safely clone this struct, the clones share the same sinks.
#[derive(Debug, Clone)]
pub struct DebugSinks {
    inner: Arc<Mutex<DebugSinksState>>,
}

#[derive(Debug)]
struct DebugSinksState {
    output: DebugOutput,
    log_file: Option<PathBuf>,
    file: Option<RollingFileAppender>,
    socket: Option<UdpSocket>,
    socket_target: SocketAddr,
}

impl Default for DebugSinks {
    fn default() -> Self {
        let socket_target = DEFAULT_SOCKET_TARGET
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 8081)));
        Self::with_socket_target(socket_target)
    }
}

impl DebugSinks {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Send datagrams somewhere other than [`DEFAULT_SOCKET_TARGET`].
    #[must_use]
    pub fn with_socket_target(socket_target: SocketAddr) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DebugSinksState {
                output: DebugOutput::Off,
                log_file: None,
                file: None,
                socket: None,
                socket_target,
            })),
        }
    }

    #[must_use]
    pub fn output(&self) -> DebugOutput { self.lock().output }

    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> { self.lock().log_file.clone() }

    /// Switch the sinks. `log_file` defaults to [`DEFAULT_LOG_FILE_NAME`] in the
    /// current folder and is only used by [`DebugOutput::On`]. Switching on writes a
    /// [`STARTING_LOG_MARKER`] line to the sinks.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file or the socket can't be opened.
    pub fn set_output(
        &self,
        output: DebugOutput,
        log_file: Option<&Path>,
    ) -> miette::Result<()> {
        {
            let mut state = self.lock();
            match output {
                DebugOutput::Off => {
                    state.file = None;
                    state.socket = None;
                }
                DebugOutput::On | DebugOutput::OnNoLogFile => {
                    if output == DebugOutput::On {
                        let path = log_file
                            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE_NAME), Path::to_path_buf);
                        state.file = Some(rolling_file_appender_impl::try_create(&path)?);
                        state.log_file = Some(path);
                    } else {
                        state.file = None;
                    }
                    let socket = UdpSocket::bind(("127.0.0.1", 0)).map_err(|err| {
                        miette::miette!("Can't open debug log socket: {err}")
                    })?;
                    state.socket = Some(socket);
                }
            }
            state.output = output;
        }

        if output != DebugOutput::Off {
            self.emit(format!("{STARTING_LOG_MARKER}\n").as_bytes());
        }
        tracing::debug!(message = "debug sinks -> output switched", %output);
        Ok(())
    }

    /// Write one record to every enabled sink. Sink failures are dropped, since
    /// there is nowhere left to report them.
    fn emit(&self, record: &[u8]) {
        if record.is_empty() {
            return;
        }
        let mut state = self.lock();
        if state.output == DebugOutput::Off {
            return;
        }
        if let Some(file) = state.file.as_mut() {
            file.write_all(record).ok();
            file.flush().ok();
        }
        let target = state.socket_target;
        if let Some(socket) = state.socket.as_ref() {
            socket.send_to(record, target).ok();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, DebugSinksState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Collects one formatted record and hands it to the sinks when dropped, so that a
/// record is always exactly one datagram.
#[derive(Debug)]
pub struct DebugSinkWriter {
    sinks: DebugSinks,
    buffer: Vec<u8>,
}

impl Write for DebugSinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}

impl Drop for DebugSinkWriter {
    fn drop(&mut self) { self.sinks.emit(&self.buffer); }
}

impl<'a> MakeWriter<'a> for DebugSinks {
    type Writer = DebugSinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DebugSinkWriter {
            sinks: self.clone(),
            buffer: vec![],
        }
    }
}
