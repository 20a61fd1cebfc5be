// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ClipboardService, SystemClipboard};
use std::collections::VecDeque;

pub const DEFAULT_KILL_RING_CAPACITY: usize = 10;

/// Bounded ring of killed text, newest first. When `to_clipboard` is on, kills are
/// also put on the clipboard and a yank prefers the clipboard content (so that text
/// copied in another program can be yanked).
#[derive(Debug)]
pub struct KillRing {
    entries: VecDeque<String>,
    capacity: usize,
    pub to_clipboard: bool,
    clipboard: Box<dyn ClipboardService>,
}

impl Default for KillRing {
    fn default() -> Self { Self::new(Box::new(SystemClipboard)) }
}

impl KillRing {
    #[must_use]
    pub fn new(clipboard: Box<dyn ClipboardService>) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: DEFAULT_KILL_RING_CAPACITY,
            to_clipboard: false,
            clipboard,
        }
    }

    pub fn set_clipboard(&mut self, clipboard: Box<dyn ClipboardService>) {
        self.clipboard = clipboard;
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Push a new entry. Empty text is ignored.
    pub fn kill(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.entries.push_front(text.to_string());
        self.entries.truncate(self.capacity);
        self.sync_clipboard();
    }

    /// Grow the newest entry instead of pushing a new one, used when kills follow
    /// each other. `prepend` is for backward kills.
    pub fn kill_append(&mut self, text: &str, prepend: bool) {
        if text.is_empty() {
            return;
        }
        match self.entries.front_mut() {
            Some(front) if prepend => front.insert_str(0, text),
            Some(front) => front.push_str(text),
            None => self.entries.push_front(text.to_string()),
        }
        self.sync_clipboard();
    }

    fn sync_clipboard(&mut self) {
        if !self.to_clipboard {
            return;
        }
        if let Some(front) = self.entries.front().cloned() {
            self.copy_to_clipboard(front);
        }
    }

    /// Failures are logged, the kill ring still works without a clipboard.
    pub fn copy_to_clipboard(&mut self, text: String) {
        if let Err(err) = self.clipboard.try_to_put_content_into_clipboard(text) {
            tracing::error!(message = "kill ring -> can't write to clipboard", %err);
        }
    }

    /// Clipboard content, `None` if it is empty or unreachable.
    pub fn clipboard_content(&mut self) -> Option<String> {
        match self.clipboard.try_to_get_content_from_clipboard() {
            Ok(it) if !it.is_empty() => Some(it),
            Ok(_) => None,
            Err(err) => {
                tracing::error!(message = "kill ring -> can't read from clipboard", %err);
                None
            }
        }
    }

    /// Text to insert for a yank.
    pub fn yank(&mut self) -> Option<String> {
        if self.to_clipboard
            && let Some(it) = self.clipboard_content()
        {
            return Some(it);
        }
        self.entries.front().cloned()
    }

    /// Rotate the ring and return the new newest entry, for `yank_pop`.
    pub fn rotate(&mut self) -> Option<String> {
        if self.entries.len() > 1 {
            self.entries.rotate_left(1);
        }
        self.entries.front().cloned()
    }
}
