//! Errors and plane geometry shared by the style, tool and cache layers.

pub mod errors;
pub mod geometry;

pub use errors::{ToolError, ToolResult};
pub use geometry::Bounds;
