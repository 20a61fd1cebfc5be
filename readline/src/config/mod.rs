// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod config_script;
pub mod engine_options;
pub mod palette;
pub mod parse_and_bind;
pub mod readline_config;
pub mod settable_options;

// Re-export.
pub use config_script::*;
pub use engine_options::*;
pub use palette::*;
pub use parse_and_bind::*;
pub use readline_config::*;
pub use settable_options::*;
