// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod default_paths;
pub mod readline_error;
pub mod time_source;

// Re-export.
pub use default_paths::*;
pub use readline_error::*;
pub use time_source::*;
