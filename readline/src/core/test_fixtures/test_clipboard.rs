// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ClipboardResult, ClipboardService};
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory [`ClipboardService`]. Clones share the same content, so a test can keep
/// one handle and give the other to a kill ring.
#[derive(Debug, Clone, Default)]
pub struct TestClipboard {
    content: Arc<Mutex<String>>,
}

impl TestClipboard {
    #[must_use]
    pub fn new(content: &str) -> Self {
        Self {
            content: Arc::new(Mutex::new(content.to_string())),
        }
    }

    #[must_use]
    pub fn content(&self) -> String {
        self.content
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ClipboardService for TestClipboard {
    fn try_to_put_content_into_clipboard(&mut self, content: String) -> ClipboardResult<()> {
        *self.content.lock().unwrap_or_else(PoisonError::into_inner) = content;
        Ok(())
    }

    fn try_to_get_content_from_clipboard(&mut self) -> ClipboardResult<String> {
        Ok(self.content())
    }
}
