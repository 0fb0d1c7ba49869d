//! Tool abstraction for the dialogue-policy action surface.

pub mod builtin;
pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::*;
