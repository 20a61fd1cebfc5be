// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod bindings;
pub mod history_facade;
pub mod input_loop;
pub mod interrupt;
pub mod mode_registry;
pub mod readline;
pub mod render;

// Re-export.
pub use interrupt::*;
pub use mode_registry::*;
pub use readline::*;
pub use render::*;
