// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug, time::Instant};

/// Source of "now" for the interrupt tap window. Tests swap in
/// [`crate::ManualClock`] so that tap timing is deterministic.
pub trait Clock: Debug + Send {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant { Instant::now() }
}
