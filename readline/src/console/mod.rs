// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod console_surface;
pub mod crossterm_console;
pub mod text_style;
pub mod uninitialized_console;
pub mod write_layout;

// Re-export.
pub use console_surface::*;
pub use crossterm_console::*;
pub use text_style::*;
pub use uninitialized_console::*;
pub use write_layout::*;
