// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use copypasta_ext::{copypasta::ClipboardProvider, x11_fork::ClipboardContext};
use std::{error::Error, fmt::Debug};

pub type ClipboardResult<T> = Result<T, Box<dyn Error + Send + Sync + 'static>>;

/// Abstraction for the clipboard service for dependency injection. This trait is
/// implemented by both a test clipboard service ([`crate::TestClipboard`]) and a
/// system clipboard service ([`SystemClipboard`]).
pub trait ClipboardService: Debug + Send {
    /// # Errors
    ///
    /// Returns an error if the clipboard is not reachable.
    fn try_to_put_content_into_clipboard(&mut self, content: String)
    -> ClipboardResult<()>;

    /// # Errors
    ///
    /// Returns an error if the clipboard is not reachable.
    fn try_to_get_content_from_clipboard(&mut self) -> ClipboardResult<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardService for SystemClipboard {
    fn try_to_put_content_into_clipboard(
        &mut self,
        content: String,
    ) -> ClipboardResult<()> {
        let mut ctx = ClipboardContext::new()?;
        ctx.set_contents(content)?;
        tracing::debug!(message = "clipboard -> killed text copied to clipboard");
        Ok(())
    }

    fn try_to_get_content_from_clipboard(&mut self) -> ClipboardResult<String> {
        let mut ctx = ClipboardContext::new()?;
        let content = ctx.get_contents()?;
        Ok(content)
    }
}
