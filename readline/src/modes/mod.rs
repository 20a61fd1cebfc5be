// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod command;
pub mod commands;
pub mod completion;
pub mod editing_mode;
pub mod emacs_mode;
pub mod incremental_search;
pub mod mode_state;
pub mod vi_mode;

// Re-export.
pub use command::*;
pub use commands::*;
pub use completion::*;
pub use editing_mode::*;
pub use emacs_mode::*;
pub use incremental_search::*;
pub use mode_state::*;
pub use vi_mode::*;
