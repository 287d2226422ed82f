//! Style descriptors consumed by the tool cache
//!
//! Styles are shared as `Arc<...>` and identified by pointer: two styles with
//! identical properties are still different cache keys. Properties live behind
//! a `parking_lot::RwLock` so the editing side can change them in place and
//! then tell the cache through `ToolCache::notify_style_changed`.

mod cap;
mod color;
mod fill;
mod line;
pub mod set;
mod shape;
mod text;

use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::Arc;

pub use cap::{CapProps, CapShape, CapStyle};
pub use color::{ColorProps, ColorStyle, Rgba};
pub use fill::{
    image_from_rgba, load_image, FillMode, FillProps, FillStyle, HatchStyle, ImageHandle,
    ImageLayout,
};
pub use line::{DashType, LineJoin, LineProps, LineStyle};
pub use set::StyleSet;
pub use shape::{ShapeProps, ShapeStyle};
pub use text::{
    CharacterProps, CharacterStyle, ContentAlignment, FontFamily, FontStyle, ParagraphProps,
    ParagraphStyle, Trimming,
};

/// A named style with editable properties
#[derive(Debug)]
pub struct Style<P> {
    name: String,
    props: RwLock<P>,
}

impl<P> Style<P> {
    /// Create a shared style
    pub fn new(name: impl Into<String>, props: P) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            props: RwLock::new(props),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Borrow the current properties
    pub fn read(&self) -> RwLockReadGuard<'_, P> {
        self.props.read()
    }

    /// Change properties in place
    ///
    /// Cached tools built from this style are stale until the cache is notified.
    pub fn edit<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        f(&mut self.props.write())
    }
}

impl<P: Clone> Style<P> {
    /// Snapshot of the current properties
    pub fn props(&self) -> P {
        self.props.read().clone()
    }
}

/// Any style, tagged by category
#[derive(Debug, Clone)]
pub enum AnyStyle {
    Cap(Arc<CapStyle>),
    Character(Arc<CharacterStyle>),
    Color(Arc<ColorStyle>),
    Fill(Arc<FillStyle>),
    Line(Arc<LineStyle>),
    Paragraph(Arc<ParagraphStyle>),
    Shape(Arc<ShapeStyle>),
}

impl AnyStyle {
    pub fn name(&self) -> &str {
        match self {
            Self::Cap(s) => s.name(),
            Self::Character(s) => s.name(),
            Self::Color(s) => s.name(),
            Self::Fill(s) => s.name(),
            Self::Line(s) => s.name(),
            Self::Paragraph(s) => s.name(),
            Self::Shape(s) => s.name(),
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::Cap(_) => "cap",
            Self::Character(_) => "character",
            Self::Color(_) => "color",
            Self::Fill(_) => "fill",
            Self::Line(_) => "line",
            Self::Paragraph(_) => "paragraph",
            Self::Shape(_) => "shape",
        }
    }
}

impl From<Arc<CapStyle>> for AnyStyle {
    fn from(style: Arc<CapStyle>) -> Self {
        Self::Cap(style)
    }
}

impl From<Arc<CharacterStyle>> for AnyStyle {
    fn from(style: Arc<CharacterStyle>) -> Self {
        Self::Character(style)
    }
}

impl From<Arc<ColorStyle>> for AnyStyle {
    fn from(style: Arc<ColorStyle>) -> Self {
        Self::Color(style)
    }
}

impl From<Arc<FillStyle>> for AnyStyle {
    fn from(style: Arc<FillStyle>) -> Self {
        Self::Fill(style)
    }
}

impl From<Arc<LineStyle>> for AnyStyle {
    fn from(style: Arc<LineStyle>) -> Self {
        Self::Line(style)
    }
}

impl From<Arc<ParagraphStyle>> for AnyStyle {
    fn from(style: Arc<ParagraphStyle>) -> Self {
        Self::Paragraph(style)
    }
}

impl From<Arc<ShapeStyle>> for AnyStyle {
    fn from(style: Arc<ShapeStyle>) -> Self {
        Self::Shape(style)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_changes_snapshot() {
        let red = ColorStyle::new("Red", ColorProps::new(Rgba::opaque(255, 0, 0)));
        let before = red.props();
        red.edit(|p| p.color = Rgba::opaque(0, 0, 255));

        assert_eq!(before.color, Rgba::opaque(255, 0, 0));
        assert_eq!(red.props().color, Rgba::opaque(0, 0, 255));
        assert_eq!(red.name(), "Red");
    }

    #[test]
    fn test_any_style_from_arc() {
        let red = ColorStyle::new("Red", ColorProps::new(Rgba::opaque(255, 0, 0)));
        let any: AnyStyle = red.clone().into();
        assert_eq!(any.category(), "color");
        assert_eq!(any.name(), "Red");

        let shape: AnyStyle = ShapeStyle::new("Plain", ShapeProps::default()).into();
        assert_eq!(shape.category(), "shape");
    }
}
