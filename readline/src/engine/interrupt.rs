// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{EngineOptions, KeyPress};
use std::time::Instant;

/// What an abort signal turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Deliver this chord to the editing mode instead of aborting.
    Swallowed(KeyPress),
    /// Abort the read.
    Abort,
}

/// Tells a single Ctrl+C tap from a deliberate double tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptTracker {
    last_tap: Instant,
}

impl InterruptTracker {
    #[must_use]
    pub fn new(now: Instant) -> Self { Self { last_tap: now } }

    /// Called when a read starts. A tap right after the prompt appears counts as the
    /// second tap of a pair.
    pub fn reset(&mut self, now: Instant) { self.last_tap = now; }

    pub fn on_abort(&mut self, options: &EngineOptions, now: Instant) -> TapOutcome {
        if !options.interrupts_allowed {
            tracing::debug!(message = "interrupt -> abort, interrupts not allowed");
            return TapOutcome::Abort;
        }
        let gap = now.saturating_duration_since(self.last_tap);
        if gap < options.tap_window {
            tracing::debug!(message = "interrupt -> abort, double tap", ?gap);
            return TapOutcome::Abort;
        }
        tracing::debug!(message = "interrupt -> swallowed tap", ?gap);
        self.last_tap = now;
        TapOutcome::Swallowed(KeyPress::ctrl_c())
    }
}
