// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod clipboard_service;
pub mod history;
pub mod kill_ring;
pub mod line_buffer_impl;

// Re-export.
pub use clipboard_service::*;
pub use history::*;
pub use kill_ring::*;
pub use line_buffer_impl::*;
