// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Interactive demo. Type lines, they are echoed back. `exit`, Ctrl+D on an empty
//! line, or Ctrl+C (a double tap when `allow_ctrl_c` is on) quit.
//!
//! ```text
//! cargo run --bin readline_demo -- --mode vi
//! cargo run --bin readline_demo -- --callback --log-file /tmp/readline.log
//! ```

use clap::Parser;
use r3bl_readline::{Completer, CrosstermConsole, DebugSinks, Readline, ReadlineConfig,
                    ReadlineError, TracingConfig, try_initialize_logging_global};
use std::{io::{self, Write},
          path::PathBuf,
          sync::{Arc, Mutex, PoisonError},
          time::Duration};
use tokio::sync::mpsc;

const PROMPT: &str = "> ";
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
#[derive(Debug, Parser)]
#[command(bin_name = "readline_demo")]
#[command(about = "Line editor demo: emacs and vi key bindings, history, completion")]
#[command(version)]
#[command(next_line_help = true)]
pub struct CLIArg {
    /// Configuration file to run at start up.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// History file, loaded at start up and saved on exit.
    #[arg(long)]
    pub history: Option<PathBuf>,

    /// Editing mode to start in.
    #[arg(long, short = 'm', default_value = "emacs")]
    pub mode: String,

    /// Drive the engine with the callback protocol from a tokio event loop.
    #[arg(long)]
    pub callback: bool,

    /// Log to this file. The `debug_output` configuration function can also turn on
    /// the network log sink.
    #[arg(long, short = 'l')]
    pub log_file: Option<String>,
}

// Note: The `tokio::main` macro internally calls `.expect("Failed building the Runtime")`
// when initializing the Tokio runtime. The lint must be suppressed here.
#[tokio::main]
#[allow(clippy::unwrap_in_result)]
async fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    let debug_sinks = DebugSinks::new();
    let tracing_config = match &cli_arg.log_file {
        Some(file) => TracingConfig::new_file(Some(file.clone())),
        None => TracingConfig::new_debug_sinks(debug_sinks.clone()),
    }
    .with_debug_sinks(debug_sinks.clone());
    try_initialize_logging_global(tracing_config)?;

    let mut config = ReadlineConfig::default();
    if let Some(history) = cli_arg.history.clone() {
        config.history_file = history;
    }
    if let Some(file) = cli_arg.config.clone() {
        config = config.with_config_file(file);
    }

    let console = CrosstermConsole::try_new()?;
    let mut readline =
        Readline::try_new(Box::new(console), config)?.with_debug_sinks(debug_sinks);
    readline.switch_mode(&cli_arg.mode)?;
    readline.read_history_file(None)?;
    let completer: Completer = Arc::new(|text: &str, state: usize| -> Option<String> {
        ["exit", "help", "history", "hello"]
            .iter()
            .filter(|it| it.starts_with(text))
            .nth(state)
            .map(ToString::to_string)
    });
    readline.set_completer(Some(completer));

    let result = if cli_arg.callback {
        run_callback_loop(&mut readline).await
    } else {
        run_blocking_loop(&mut readline)
    };

    readline.write_history_file(None)?;
    drop(readline);
    match result {
        Ok(()) | Err(ReadlineError::EndOfFile | ReadlineError::Aborted) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn run_blocking_loop(readline: &mut Readline) -> Result<(), ReadlineError> {
    loop {
        let line = readline.read_line(PROMPT)?;
        if !echo(&line, readline.history_entries())? {
            return Ok(());
        }
    }
}

/// The host owns the loop and polls the engine on a timer, so other work could be
/// multiplexed into the same `select!`.
///
/// The callback runs after the line is finished and before the engine prints the next
/// prompt, so it writes the reply itself. It reads a snapshot of the history that the
/// loop refreshes after each line, and sends back whether to keep going.
async fn run_callback_loop(readline: &mut Readline) -> Result<(), ReadlineError> {
    let history = Arc::new(Mutex::new(readline.history_entries().to_vec()));
    let (sender, mut receiver) = mpsc::unbounded_channel::<bool>();
    let snapshot = history.clone();
    readline.install_callback(PROMPT, move |line| {
        let entries = snapshot.lock().unwrap_or_else(PoisonError::into_inner);
        let keep_going = echo(&line, &entries).unwrap_or(false);
        drop(entries);
        // The receiver lives until the loop below ends.
        sender.send(keep_going).ok();
    })?;

    let mut interval = tokio::time::interval(POLL_INTERVAL);
    let result = loop {
        tokio::select! {
            _ = interval.tick() => {
                while readline.event_available()? {
                    readline.read_char_step()?;
                }
            }
            Some(keep_going) = receiver.recv() => {
                if !keep_going {
                    break Ok(());
                }
                *history.lock().unwrap_or_else(PoisonError::into_inner) =
                    readline.history_entries().to_vec();
            }
        }
    };
    readline.remove_callback();
    result
}

/// Returns `false` when the user asked to quit.
fn echo(line: &str, history: &[String]) -> io::Result<bool> {
    let line = line.trim_end();
    if line == "exit" {
        return Ok(false);
    }
    let mut stdout = io::stdout();
    match line {
        "history" => {
            for (index, entry) in history.iter().enumerate() {
                write!(stdout, "{index:>4}  {entry}\r\n")?;
            }
        }
        "help" => write!(stdout, "Commands: help, history, exit. Anything else is echoed.\r\n")?,
        _ => write!(stdout, "echo: {line}\r\n")?,
    }
    stdout.flush()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_stops_other_lines_continue() {
        assert!(!echo("exit\n", &[]).unwrap());
        assert!(echo("hello\n", &["hello".to_string()]).unwrap());
    }
}
