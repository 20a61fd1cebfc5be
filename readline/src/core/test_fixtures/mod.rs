// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod console_mock;
pub mod manual_clock;
pub mod stdout_mock;
pub mod test_clipboard;

// Re-export.
pub use console_mock::*;
pub use manual_clock::*;
pub use stdout_mock::*;
pub use test_clipboard::*;
