// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod key_description;
pub mod key_press;
pub mod modifier_keys_mask;

// Re-export.
pub use key_description::*;
pub use key_press::*;
pub use modifier_keys_mask::*;
