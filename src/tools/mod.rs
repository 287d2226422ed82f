//! Drawing tools built from styles
//!
//! Everything here is a pure function of its inputs; caching and invalidation
//! live in [`crate::cache`].

pub mod brush;
pub mod cap_shape;
pub mod color;
pub mod path;
pub mod pen;
pub mod text;

pub use brush::{Brush, BrushKind, ImageAttributes};
pub use cap_shape::build_cap_shape;
pub use color::{resolve_color, to_grayscale};
pub use path::{PathElement, ShapePath};
pub use pen::{CustomLineCap, LineEnd, Pen};
pub use text::{Font, StringAlignment, StringFormat, StringFormatFlags};
